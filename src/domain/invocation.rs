//! Records of calls made through a mock.

use crate::domain::args::describe_args;
use serde_json::Value;
use std::fmt;
use std::time::Instant;

/// One observed call.
///
/// Records are append-only: created when a call enters a mock and kept for the
/// lifetime of that mock.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct InvocationRecord {
    /// Position in the mock's call history, starting at 0
    pub seq: u64,
    /// Name of the called method
    pub method: String,
    /// Encoded arguments, in order
    pub args: Vec<Value>,
    /// Clock reading when the call was made
    pub at: Instant,
}

impl InvocationRecord {
    /// Create a record.
    pub fn new(seq: u64, method: impl Into<String>, args: Vec<Value>, at: Instant) -> Self {
        Self {
            seq,
            method: method.into(),
            args,
            at,
        }
    }
}

impl fmt::Display for InvocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}{}", self.seq, self.method, describe_args(&self.args))
    }
}
