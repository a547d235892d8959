use std::fmt::Debug;
use std::time::Duration;

/// Blocking wait used between enrichment calls.
pub trait Sleeper: Debug {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Spaces out consecutive calls to the external services: a fixed pause
/// between calls, never before the first or after the last.
#[derive(Debug)]
pub struct CallPacer {
    delay: Duration,
    sleeper: Box<dyn Sleeper>,
}

impl CallPacer {
    pub fn new(delay: Duration, sleeper: Box<dyn Sleeper>) -> Self {
        Self { delay, sleeper }
    }

    /// Negative or non-finite delays collapse to no delay.
    pub fn from_seconds(seconds: f64, sleeper: Box<dyn Sleeper>) -> Self {
        let delay = Duration::try_from_secs_f64(seconds).unwrap_or_default();
        Self::new(delay, sleeper)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Called after call `completed` (zero-based) of `total` has finished.
    pub fn after_call(&self, completed: usize, total: usize) {
        if completed + 1 < total && !self.delay.is_zero() {
            self.sleeper.sleep(self.delay);
        }
    }
}
