//! Append-only history of calls made through a mock.

use crate::domain::invocation::InvocationRecord;
use crate::domain::matcher::ArgsMatcher;
use serde_json::Value;
use std::time::Instant;

/// Call history for one mock.
///
/// Records are never removed; the history lives as long as the mock.
#[derive(Debug, Default)]
pub struct InvocationRecorder {
    records: Vec<InvocationRecord>,
    next_seq: u64,
}

impl InvocationRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call and return its sequence number.
    pub fn record(&mut self, method: &str, args: Vec<Value>, at: Instant) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records
            .push(InvocationRecord::new(seq, method, args, at));
        seq
    }

    /// Count calls to `method` whose arguments satisfy `matcher`.
    pub fn query(&self, method: &str, matcher: &ArgsMatcher) -> usize {
        self.calls_to(method)
            .filter(|record| matcher.matches(&record.args))
            .count()
    }

    /// Calls to `method`, in call order.
    pub fn calls_to<'a>(
        &'a self,
        method: &'a str,
    ) -> impl Iterator<Item = &'a InvocationRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.method == method)
    }

    /// All calls, in call order.
    pub fn records(&self) -> &[InvocationRecord] {
        &self.records
    }

    /// Total number of recorded calls.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
