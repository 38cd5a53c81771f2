//! Ports (interfaces) for the application layer.
//!
//! Infrastructure adapters implement these ports.

use std::fmt::Debug;
use std::time::Instant;

/// Port for obtaining current time.
///
/// Invocation records are stamped with this clock. Infrastructure provides
/// concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}
