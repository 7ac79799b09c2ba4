use embedded_hal::digital::PinState;

use crate::Direction;

use PinState::{High as H, Low as L};

/// Number of phases in the half-step sequence.
pub const PHASE_COUNT: u8 = 8;

/// Line levels `[A, B, C, D]` for each phase of the half-step sequence.
///
/// Even phases energize two windings; odd phases energize one. Stepping
/// forward walks down the table, stepping in reverse walks up it.
const HALF_STEP_SEQUENCE: [[PinState; 4]; PHASE_COUNT as usize] = [
    [H, L, L, H],
    [L, L, L, H],
    [L, L, H, H],
    [L, L, H, L],
    [L, H, H, L],
    [L, H, L, L],
    [H, H, L, L],
    [H, L, L, L],
];

/// Line levels which de-energize every winding.
pub const RELEASED: [PinState; 4] = [L, L, L, L];

/// Index into the half-step sequence.
///
/// A `Phase` is always in the range `[0, 7]`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Phase(u8);
impl Phase {
    /// The phase a motor starts in.
    pub fn zero() -> Self {
        Phase(0)
    }

    /// Creates a phase, wrapping `index` into range.
    pub fn new(index: u8) -> Self {
        Phase(index % PHASE_COUNT)
    }

    /// Returns the index of the phase in the sequence.
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Returns the phase one step away in the supplied direction.
    pub fn next(&self, direction: Direction) -> Phase {
        match direction {
            Direction::Positive => Phase((self.0 + 1) % PHASE_COUNT),
            Direction::Negative => {
                Phase((self.0 + PHASE_COUNT - 1) % PHASE_COUNT)
            }
        }
    }

    /// Returns the line levels `[A, B, C, D]` of this phase.
    pub fn pattern(&self) -> [PinState; 4] {
        HALF_STEP_SEQUENCE[self.0 as usize]
    }
}
