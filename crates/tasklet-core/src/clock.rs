use crate::date::Timestamp;

/// Source of "now" for `created_at` / `updated_at` bookkeeping.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// Clock backed by the operating system's UTC time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
