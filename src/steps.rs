use ufmt_macros::uDebug;

use crate::Direction;

/// Underlying type representing the number of steps.
type StepRepr = i32;

/// Signed number of steps.
///
/// The sign encodes the direction of travel and the magnitude encodes how
/// far to go. Zero means there is nowhere to go.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct Steps(StepRepr);
impl Steps {
    /// Create a new number of steps.
    pub fn new(steps: StepRepr) -> Self {
        Self(steps)
    }

    /// Zero steps.
    pub fn zero() -> Self {
        Steps(0)
    }

    /// Returns the value represented by `Steps`.
    pub fn get_value(&self) -> StepRepr {
        self.0
    }

    /// Returns `true` if there are no steps left.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the direction in which these steps travel.
    ///
    /// # Returns
    ///
    /// - `Some(Direction::Positive)` for a positive count.
    /// - `Some(Direction::Negative)` for a negative count.
    /// - `None` for zero.
    pub fn direction(&self) -> Option<Direction> {
        match self.0 {
            0 => None,
            n if n > 0 => Some(Direction::Positive),
            _ => Some(Direction::Negative),
        }
    }

    /// Returns the count with one step taken off its magnitude.
    ///
    /// This never overflows: a positive count is decremented and a negative
    /// count is incremented. Zero stays at zero.
    pub fn toward_zero(&self) -> Self {
        Steps(self.0 - self.0.signum())
    }
}
