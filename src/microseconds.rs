use ufmt_macros::uDebug;

/// Time in microseconds.
///
/// Timestamps read from a [crate::Clock] wrap around at `u32::MAX` (a little
/// over 71 minutes), so the difference between two timestamps must always be
/// taken with [MicroSeconds::elapsed_since].
#[derive(Debug, uDebug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone)]
pub struct MicroSeconds(u32);
impl MicroSeconds {
    /// Creates a new `MicroSeconds`.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the value as a `u32`.
    pub fn get_value(&self) -> u32 {
        self.0
    }

    /// Returns the time elapsed from `earlier` until `self`.
    ///
    /// Subtraction is modulo 2^32, so the result is correct even if the clock
    /// wrapped between the two readings, provided less than one full period
    /// passed.
    pub fn elapsed_since(&self, earlier: MicroSeconds) -> MicroSeconds {
        MicroSeconds(self.0.wrapping_sub(earlier.0))
    }
}
