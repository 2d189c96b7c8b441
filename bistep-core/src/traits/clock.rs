//! Monotonic clock abstraction
//!
//! The driver never looks at absolute time; it only takes wrapping
//! differences between readings, so a counter that rolls over at
//! `u32::MAX` is fine (see [`crate::timing::elapsed_micros`]).

/// A free-running microsecond counter.
pub trait Clock {
    /// Current counter value in microseconds. Wraps at `u32::MAX`.
    fn now_micros(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_micros(&self) -> u32 {
        (**self).now_micros()
    }
}
