//! Microsecond time base

/// Monotonic microsecond clock
///
/// Pulse-width measurement busy-polls an input pin against this clock.
/// Implementations must never go backwards; wrapping is not expected within
/// the lifetime of the firmware (64-bit counter).
pub trait MicrosClock {
    /// Current time in microseconds since an arbitrary epoch
    fn now_us(&self) -> u64;
}

impl<C: MicrosClock + ?Sized> MicrosClock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
