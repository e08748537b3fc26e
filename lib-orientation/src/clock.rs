use core::cell::Cell;

/// Monotonic millisecond time source (think Arduino's `millis()`), the epoch is arbitrary.
/// 
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// A manually advanced clock, used when replaying recorded samples and in tests.
/// 
impl Clock for Cell<u64> {
    #[inline]
    fn now_ms(&self) -> u64 {
        self.get()
    }
}
