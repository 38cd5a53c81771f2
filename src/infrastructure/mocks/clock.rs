//! Mock clock for testing.

use crate::application::ports::Clock;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Mock clock for testing.
///
/// Lets tests control the instants stamped on invocation records.
///
/// # Examples
///
/// ```
/// use stunt_double::infrastructure::mocks::MockClock;
/// use stunt_double::MockHandle;
/// use std::sync::Arc;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let clock = MockClock::new(start);
/// let handle = MockHandle::builder()
///     .with_clock(Arc::new(clock.clone()))
///     .build()
///     .unwrap();
///
/// handle.call::<_, ()>("write", ("first",));
/// clock.advance(Duration::from_millis(250));
/// handle.call::<_, ()>("write", ("second",));
///
/// let records = handle.invocations();
/// assert_eq!(records[1].at - records[0].at, Duration::from_millis(250));
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying time value, so advancing time in one
/// clone affects all clones.
#[derive(Debug, Clone)]
pub struct MockClock {
    current_time: Arc<Mutex<Instant>>,
}

impl MockClock {
    /// Create a mock clock starting at a specific instant.
    pub fn new(start: Instant) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(start)),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self
            .current_time
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *time += duration;
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, instant: Instant) {
        let mut time = self
            .current_time
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *time = instant;
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self
            .current_time
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
    }
}
