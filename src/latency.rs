//! Simulated latency.
//!
//! Every delay in the connection layer goes through a [`Sleeper`], so tests
//! can swap real sleeping for a double that only records what was asked for.

use parking_lot::Mutex;
use std::fmt;
use std::time::Duration;

/// Something that can wait for a duration.
pub trait Sleeper: Send + Sync {
    /// Wait for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSleeper;

impl Sleeper for NoopSleeper {
    fn sleep(&self, _duration: Duration) {}
}

/// Records every requested delay without waiting.
///
/// # Example
///
/// ```
/// use recordstore::{RecordingSleeper, Sleeper};
/// use std::time::Duration;
///
/// let sleeper = RecordingSleeper::new();
/// sleeper.sleep(Duration::from_secs(1));
///
/// assert_eq!(sleeper.calls(), vec![Duration::from_secs(1)]);
/// ```
#[derive(Default)]
pub struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Create a recorder with no calls
    pub fn new() -> Self {
        Self::default()
    }

    /// All requested delays, in call order
    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().clone()
    }

    /// Number of sleep requests
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Sum of all requested delays
    pub fn total(&self) -> Duration {
        self.calls.lock().iter().sum()
    }

    /// True if `duration` was requested at least once
    pub fn was_called_with(&self, duration: Duration) -> bool {
        self.calls.lock().contains(&duration)
    }

    /// Forget recorded calls
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.calls.lock().push(duration);
    }
}

impl fmt::Debug for RecordingSleeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSleeper")
            .field("calls", &self.call_count())
            .finish()
    }
}
