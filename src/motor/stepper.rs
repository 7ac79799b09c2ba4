use crate::Direction;

/// Stepper motor.
///
/// This is the motor as seen by a [crate::StepperDriver]: something which
/// can take single steps and have its windings switched on and off. Timing
/// and position tracking are the job of the driver.
pub trait Stepper {
    /// Takes a single step in the supplied direction.
    ///
    /// # Parameters
    ///
    /// - `direction`: Direction in which to take the step.
    fn step(&mut self, direction: Direction);

    /// Energizes the windings at the current phase, without stepping.
    fn power_up(&mut self);

    /// De-energizes every winding.
    fn power_down(&mut self);
}

#[cfg(test)]
pub mod test {
    use crate::direction::test::direction;
    use super::*;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    /// Stepper to use for testing purposes.
    ///
    /// This is just a position counter and a flag recording whether the
    /// windings are energized. It uses `i128`, since that is likely to be a
    /// very much larger range than the step range of any real-world stepper.
    ///
    /// If the `TestStepper` is cloned then the underlying state is shared.
    /// This lets a test keep a handle on a stepper owned by a driver.
    #[derive(Clone)]
    pub struct TestStepper {
        position: Arc<Mutex<i128>>,
        energized: Arc<Mutex<bool>>,
    }
    impl TestStepper {
        /// Creates a new test stepper with its windings off.
        pub fn new(position: i128) -> Self {
            Self {
                position: Arc::new(Mutex::new(position)),
                energized: Arc::new(Mutex::new(false)),
            }
        }

        /// Returns the position of a test stepper.
        pub fn get_position(&self) -> i128 {
            *self.position.lock().unwrap()
        }

        /// Returns `true` if the windings are energized.
        pub fn is_energized(&self) -> bool {
            *self.energized.lock().unwrap()
        }

        /// Executes a step for the test stepper.
        fn do_step(&mut self, direction: Direction) {
            let mut pos = self.position.lock().unwrap();

            *pos = match direction {
                Direction::Negative => pos
                    .checked_sub_unsigned(1)
                    .expect("TestStepper overflowed (-) its position!"),
                Direction::Positive => pos
                    .checked_add_unsigned(1)
                    .expect("TestStepper overflowed (+) its position!"),
            };
            *self.energized.lock().unwrap() = true;
        }
    }
    impl Stepper for TestStepper {
        fn step(&mut self, direction: Direction) {
            self.do_step(direction);
        }

        fn power_up(&mut self) {
            *self.energized.lock().unwrap() = true;
        }

        fn power_down(&mut self) {
            *self.energized.lock().unwrap() = false;
        }
    }

    proptest! {
        #[test]
        fn test_step(pos in i32::MIN..i32::MAX, dir in direction()) {
            let mut stepper = TestStepper::new(pos as i128);
            let expected = match dir {
                Direction::Positive => pos as i128 + 1,
                Direction::Negative => pos as i128 - 1
            };

            assert_eq!(pos as i128, stepper.get_position());
            stepper.step(dir);
            assert_eq!(expected, stepper.get_position());
            assert!(stepper.is_energized());
        }
    }

    #[test]
    fn test_power() {
        let mut stepper = TestStepper::new(0);
        assert!(!stepper.is_energized());
        stepper.power_up();
        assert!(stepper.is_energized());
        stepper.power_down();
        assert!(!stepper.is_energized());
        assert_eq!(0, stepper.get_position());
    }
}
