use crate::MicroSeconds;

/// Monotonic microsecond clock.
///
/// Readings wrap around at `u32::MAX`. Consumers must only ever compare
/// readings with [MicroSeconds::elapsed_since].
pub trait Clock {
    /// Returns the time elapsed since some fixed point (usually boot).
    fn now(&self) -> MicroSeconds;
}

/// A shared reference to a clock is also a clock, so that several drivers
/// can read the same timer.
impl<K: Clock + ?Sized> Clock for &K {
    fn now(&self) -> MicroSeconds {
        (**self).now()
    }
}
