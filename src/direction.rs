use ufmt_macros::uDebug;

/// Describes the direction of rotation for a step.
///
/// The direction is encoded in the sign of a [crate::Steps] count: positive
/// counts move [Direction::Positive], negative counts move
/// [Direction::Negative].
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    /// Forward (clockwise) rotation. Advances the phase table.
    Positive,
    /// Reverse (counter-clockwise) rotation. Retreats the phase table.
    Negative,
}
impl Direction {
    /// Returns the opposite direction.
    pub fn reverse(&self) -> Direction {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}
