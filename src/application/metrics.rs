//! Per-mock call statistics.
//!
//! Counters describe how a mock has been exercised: how many calls it
//! recorded, how many found an expectation, how many fell through to the
//! strictness policy, and how many verifications failed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking how a mock was used.
///
/// Clones share the same counters, so a clone taken before a test runs can be
/// inspected afterwards.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Total number of calls recorded
    calls_recorded: AtomicU64,
    /// Calls resolved to a configured expectation
    calls_matched: AtomicU64,
    /// Calls with no matching expectation
    calls_unconfigured: AtomicU64,
    /// Verifications that reported a failure
    verification_failures: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                calls_recorded: AtomicU64::new(0),
                calls_matched: AtomicU64::new(0),
                calls_unconfigured: AtomicU64::new(0),
                verification_failures: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn record_call(&self) {
        self.inner.calls_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_matched(&self) {
        self.inner.calls_matched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unconfigured(&self) {
        self.inner
            .calls_unconfigured
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_verification_failure(&self) {
        self.inner
            .verification_failures
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of calls recorded.
    pub fn calls_recorded(&self) -> u64 {
        self.inner.calls_recorded.load(Ordering::Relaxed)
    }

    /// Get the number of calls that matched an expectation.
    pub fn calls_matched(&self) -> u64 {
        self.inner.calls_matched.load(Ordering::Relaxed)
    }

    /// Get the number of calls that matched no expectation.
    pub fn calls_unconfigured(&self) -> u64 {
        self.inner.calls_unconfigured.load(Ordering::Relaxed)
    }

    /// Get the number of failed verifications.
    pub fn verification_failures(&self) -> u64 {
        self.inner.verification_failures.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls_recorded: self.calls_recorded(),
            calls_matched: self.calls_matched(),
            calls_unconfigured: self.calls_unconfigured(),
            verification_failures: self.verification_failures(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total number of calls recorded
    pub calls_recorded: u64,
    /// Calls resolved to a configured expectation
    pub calls_matched: u64,
    /// Calls with no matching expectation
    pub calls_unconfigured: u64,
    /// Verifications that reported a failure
    pub verification_failures: u64,
}

impl MetricsSnapshot {
    /// Fraction of resolved calls that found an expectation (0.0 to 1.0).
    ///
    /// Returns 0.0 if no call has been resolved.
    pub fn match_rate(&self) -> f64 {
        let total = self.calls_matched.saturating_add(self.calls_unconfigured);
        if total == 0 {
            0.0
        } else {
            self.calls_matched as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initial_state() {
        let metrics = Metrics::new();
        assert_eq!(metrics.calls_recorded(), 0);
        assert_eq!(metrics.calls_matched(), 0);
        assert_eq!(metrics.calls_unconfigured(), 0);
        assert_eq!(metrics.verification_failures(), 0);
    }

    #[test]
    fn test_snapshot() {
        let metrics = Metrics::new();
        metrics.record_call();
        metrics.record_call();
        metrics.record_matched();
        metrics.record_unconfigured();
        metrics.record_verification_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.calls_recorded, 2);
        assert_eq!(snapshot.calls_matched, 1);
        assert_eq!(snapshot.calls_unconfigured, 1);
        assert_eq!(snapshot.verification_failures, 1);
    }

    #[test]
    fn test_snapshot_match_rate() {
        let metrics = Metrics::new();

        // Nothing resolved - rate should be 0
        assert_eq!(metrics.snapshot().match_rate(), 0.0);

        metrics.record_matched();
        assert!((metrics.snapshot().match_rate() - 1.0).abs() < f64::EPSILON);

        metrics.record_unconfigured();
        assert!((metrics.snapshot().match_rate() - 0.5).abs() < f64::EPSILON);

        metrics.record_matched();
        metrics.record_matched();
        assert!((metrics.snapshot().match_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metrics_clone_shares_counters() {
        let metrics1 = Metrics::new();
        metrics1.record_call();

        let metrics2 = metrics1.clone();
        metrics2.record_call();

        assert_eq!(metrics1.calls_recorded(), 2);
        assert_eq!(metrics2.calls_recorded(), 2);
    }
}
