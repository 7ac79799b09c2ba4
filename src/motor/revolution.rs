use crate::millidegrees::MILLIDEGREES_PER_REVOLUTION;
use crate::Direction;
use crate::MilliDegrees;
use crate::Steps;

/// Arithmetic on absolute positions within one revolution.
///
/// Positions are step counts in the range `[0, steps_per_revolution)`. This
/// converts:
/// - Millidegrees to positions.
/// - Positions to millidegrees.
///
/// It also performs delta calculations for movement.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Revolution {
    steps_per_revolution: u32,
}

impl Revolution {
    /// Creates a new `Revolution`.
    ///
    /// `steps_per_revolution` must be in `[1, i32::MAX]`; this is checked by
    /// [crate::Config::validate] before any driver builds one.
    pub(crate) fn new(steps_per_revolution: u32) -> Self {
        debug_assert!(steps_per_revolution > 0);
        debug_assert!(steps_per_revolution <= i32::MAX as u32);
        Self {
            steps_per_revolution,
        }
    }

    /// Returns the number of steps in a revolution.
    pub fn steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution
    }

    /// Wraps any step count into the range of positions.
    pub fn wrap(&self, position: u32) -> u32 {
        position % self.steps_per_revolution
    }

    /// Returns the position one step away in the supplied direction.
    pub fn advance(&self, position: u32, direction: Direction) -> u32 {
        match direction {
            Direction::Positive => {
                if position + 1 >= self.steps_per_revolution {
                    0
                } else {
                    position + 1
                }
            }
            Direction::Negative => {
                if position == 0 {
                    self.steps_per_revolution - 1
                } else {
                    position - 1
                }
            }
        }
    }

    /// Distance from `current` to `target` travelling only in `direction`.
    ///
    /// The result is in `[0, steps_per_revolution)`.
    fn distance(&self, current: u32, target: u32, direction: Direction) -> u32 {
        let (from, to) = match direction {
            Direction::Positive => (self.wrap(current), self.wrap(target)),
            Direction::Negative => (self.wrap(target), self.wrap(current)),
        };
        // Both are below steps_per_revolution <= i32::MAX, so this cannot
        // overflow.
        (to + self.steps_per_revolution - from) % self.steps_per_revolution
    }

    /// Computes the minimum number of steps to move from `current` to
    /// `target`.
    ///
    /// This always moves the least angular amount. When both arcs are the
    /// same length (exactly half a revolution) the positive direction is
    /// chosen.
    ///
    /// # Parameters
    ///
    /// - `current`: Current position.
    /// - `target`: Target position; wrapped into range if necessary.
    ///
    /// # Returns
    ///
    /// - The number of steps to move (signed), with magnitude at most half a
    ///   revolution.
    pub fn shortest_delta(&self, current: u32, target: u32) -> Steps {
        let forward = self.distance(current, target, Direction::Positive);
        let backward = self.distance(current, target, Direction::Negative);
        if forward <= backward {
            Steps::new(forward as i32)
        } else {
            Steps::new(-(backward as i32))
        }
    }

    /// Computes the number of steps to move from `current` to `target`,
    /// travelling only in the supplied direction.
    ///
    /// # Returns
    ///
    /// - The number of steps to move (signed). It is zero if `current` is
    ///   already at `target`, and otherwise has the sign of `direction`.
    pub fn directed_delta(
        &self,
        current: u32,
        target: u32,
        direction: Direction,
    ) -> Steps {
        let distance = self.distance(current, target, direction) as i32;
        match direction {
            Direction::Positive => Steps::new(distance),
            Direction::Negative => Steps::new(-distance),
        }
    }

    /// Converts an angle to the position at or just before it.
    ///
    /// The angle is normalized first, so negative angles and angles beyond a
    /// full turn are accepted.
    pub fn to_position(&self, angle: MilliDegrees) -> u32 {
        let millidegrees = angle.normalize().get_value() as u64;
        let position = millidegrees * self.steps_per_revolution as u64
            / MILLIDEGREES_PER_REVOLUTION as u64;
        // Normalized angles are below a revolution, so this fits.
        position as u32
    }

    /// Converts an angle offset to a signed number of steps.
    ///
    /// Unlike [Revolution::to_position] this does not normalize, so `-720`
    /// degrees is two full reverse turns. Returns `None` if the result would
    /// not fit in a [Steps].
    pub fn to_steps(&self, angle: MilliDegrees) -> Option<Steps> {
        (angle.get_value() as i64)
            .checked_mul(self.steps_per_revolution as i64)
            .map(|q| q / MILLIDEGREES_PER_REVOLUTION as i64)
            .and_then(|q| i32::try_from(q).ok())
            .map(Steps::new)
    }

    /// Converts a position to its angle.
    pub fn to_millidegrees(&self, position: u32) -> MilliDegrees {
        let millidegrees = self.wrap(position) as u64
            * MILLIDEGREES_PER_REVOLUTION as u64
            / self.steps_per_revolution as u64;
        // Below MILLIDEGREES_PER_REVOLUTION, so this fits.
        MilliDegrees::new(millidegrees as i32)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::direction::test::direction;
    use crate::millidegrees::test::millidegrees;
    use proptest::prelude::*;

    fn byj48() -> Revolution {
        Revolution::new(4096)
    }

    #[test]
    fn test_shortest_delta_cases() {
        let r = byj48();
        assert_eq!(Steps::new(10), r.shortest_delta(0, 10));
        assert_eq!(Steps::new(-6), r.shortest_delta(0, 4090));
        assert_eq!(Steps::new(2048), r.shortest_delta(0, 2048));
        assert_eq!(Steps::zero(), r.shortest_delta(17, 17));
        assert_eq!(Steps::new(6), r.shortest_delta(4093, 3));
    }

    /// At exactly half a revolution the positive direction wins, whichever
    /// side the motor starts on.
    #[test]
    fn test_shortest_delta_tie_is_positive() {
        let r = byj48();
        assert_eq!(Steps::new(2048), r.shortest_delta(3000, 952));
        assert_eq!(Steps::new(2048), r.shortest_delta(952, 3000));
    }

    #[test]
    fn test_shortest_delta_odd_revolution() {
        let r = Revolution::new(5);
        assert_eq!(Steps::new(2), r.shortest_delta(0, 2));
        assert_eq!(Steps::new(-2), r.shortest_delta(0, 3));
    }

    #[test]
    fn test_target_out_of_range_wraps() {
        let r = byj48();
        assert_eq!(Steps::new(10), r.shortest_delta(0, 4096 + 10));
    }

    #[test]
    fn test_advance_wraps() {
        let r = byj48();
        assert_eq!(0, r.advance(4095, Direction::Positive));
        assert_eq!(4095, r.advance(0, Direction::Negative));
        assert_eq!(8, r.advance(7, Direction::Positive));
        assert_eq!(6, r.advance(7, Direction::Negative));
        assert_eq!(0, Revolution::new(1).advance(0, Direction::Positive));
        assert_eq!(0, Revolution::new(1).advance(0, Direction::Negative));
    }

    #[test]
    fn test_directed_delta() {
        let r = byj48();
        let (pos, neg) = (Direction::Positive, Direction::Negative);
        assert_eq!(Steps::new(4086), r.directed_delta(0, 4086, pos));
        assert_eq!(Steps::new(-10), r.directed_delta(0, 4086, neg));
        assert_eq!(Steps::new(-4086), r.directed_delta(4086, 0, neg));
        assert_eq!(Steps::zero(), r.directed_delta(5, 5, neg));
    }

    #[test]
    fn test_angle_conversions() {
        let r = byj48();
        assert_eq!(0, r.to_position(MilliDegrees::new(0)));
        assert_eq!(2048, r.to_position(MilliDegrees::new(180_000)));
        assert_eq!(3072, r.to_position(MilliDegrees::new(-90_000)));
        assert_eq!(1024, r.to_position(MilliDegrees::new(450_000)));
        assert_eq!(MilliDegrees::new(90_000), r.to_millidegrees(1024));
        assert_eq!(
            Some(Steps::new(-8192)),
            r.to_steps(MilliDegrees::new(-720_000))
        );
        assert_eq!(Some(Steps::new(11)), r.to_steps(MilliDegrees::new(1_000)));
    }

    #[test]
    fn test_to_steps_overflow() {
        let r = Revolution::new(i32::MAX as u32);
        assert_eq!(None, r.to_steps(MilliDegrees::new(720_000)));
    }

    proptest! {
        #[test]
        fn test_shortest_delta_lands_on_target(
            n in 1u32..10_000,
            current in any::<u32>(),
            target in any::<u32>(),
        ) {
            let r = Revolution::new(n);
            let current = r.wrap(current);
            let delta = r.shortest_delta(current, target).get_value() as i64;
            assert!(delta.unsigned_abs() <= (n / 2) as u64);
            let landed = (current as i64 + delta).rem_euclid(n as i64);
            assert_eq!(r.wrap(target) as i64, landed);
        }
    }

    proptest! {
        #[test]
        fn test_directed_delta_follows_direction(
            n in 1u32..10_000,
            current in any::<u32>(),
            target in any::<u32>(),
            dir in direction(),
        ) {
            let r = Revolution::new(n);
            let current = r.wrap(current);
            let delta = r.directed_delta(current, target, dir);
            if !delta.is_zero() {
                assert_eq!(Some(dir), delta.direction());
            }
            let landed = (current as i64 + delta.get_value() as i64)
                .rem_euclid(n as i64);
            assert_eq!(r.wrap(target) as i64, landed);
        }
    }

    proptest! {
        #[test]
        fn test_to_position_in_range(mdg in millidegrees()) {
            let r = byj48();
            assert!(r.to_position(mdg) < 4096);
        }
    }

    proptest! {
        #[test]
        fn test_periodic_advance(n in 1u32..2_000, dir in direction()) {
            let r = Revolution::new(n);
            let mut position = 0;
            for _ in 0..n {
                position = r.advance(position, dir);
            }
            assert_eq!(0, position);
        }
    }
}
