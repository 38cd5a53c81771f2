//! Post-hoc verification of recorded calls.
//!
//! Verification reads the call history as it stands when invoked; it never
//! watches future calls.

use crate::application::recorder::InvocationRecorder;
use crate::domain::matcher::ArgsMatcher;
use crate::domain::times::Times;
use thiserror::Error;

/// A call pattern was observed a number of times outside the expected bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "expected {method}{matcher} to be called {expected}, but it was called {actual} time(s){}",
    render_calls(.calls)
)]
pub struct VerificationFailure {
    /// Verified method
    pub method: String,
    /// Description of the argument pattern
    pub matcher: String,
    /// Expected bounds
    pub expected: Times,
    /// Number of matching calls observed
    pub actual: usize,
    /// Every recorded call to the method, matching or not
    pub calls: Vec<String>,
}

fn render_calls(calls: &[String]) -> String {
    if calls.is_empty() {
        return String::new();
    }
    let mut rendered = String::from("\nrecorded calls:");
    for call in calls {
        rendered.push_str("\n  ");
        rendered.push_str(call);
    }
    rendered
}

/// Check that calls to `method` matching `matcher` were observed within `expected`.
///
/// # Errors
/// Returns a `VerificationFailure` carrying the method, the matcher
/// description, the expected bounds and the actual count.
pub fn verify(
    recorder: &InvocationRecorder,
    method: &str,
    matcher: &ArgsMatcher,
    expected: Times,
) -> Result<(), VerificationFailure> {
    let actual = recorder.query(method, matcher);
    if expected.contains(actual) {
        return Ok(());
    }

    Err(VerificationFailure {
        method: method.to_owned(),
        matcher: matcher.describe(),
        expected,
        actual,
        calls: recorder
            .calls_to(method)
            .map(|record| record.to_string())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::domain::matcher::{any, eq};
    use serde_json::json;
    use std::time::Instant;

    fn recorder_with_writes(n: usize) -> InvocationRecorder {
        let mut recorder = InvocationRecorder::new();
        for i in 0..n {
            recorder.record("write", vec![json!(format!("line {}", i))], Instant::now());
        }
        recorder
    }

    #[test]
    fn test_at_least_two_passes_after_two_calls() {
        let recorder = recorder_with_writes(2);
        assert!(verify(&recorder, "write", &args![any()], Times::at_least(2)).is_ok());
    }

    #[test]
    fn test_at_least_two_fails_after_one_call() {
        let recorder = recorder_with_writes(1);
        let failure = verify(&recorder, "write", &args![any()], Times::at_least(2)).unwrap_err();

        assert_eq!(failure.actual, 1);
        assert_eq!(failure.method, "write");
        assert_eq!(failure.matcher, "(any)");
        assert_eq!(failure.expected, Times::at_least(2));
        assert_eq!(failure.calls, vec!["#0 write(\"line 0\")".to_string()]);
    }

    #[test]
    fn test_exactly_once_fails_with_zero_calls() {
        let recorder = InvocationRecorder::new();
        let failure =
            verify(&recorder, "set_logger", &args![eq("dsfsd")], Times::once()).unwrap_err();

        assert_eq!(failure.actual, 0);
        assert_eq!(
            failure.to_string(),
            "expected set_logger(\"dsfsd\") to be called exactly once, but it was called 0 time(s)"
        );
    }

    #[test]
    fn test_never_passes_without_calls() {
        let recorder = InvocationRecorder::new();
        assert!(verify(&recorder, "write", &ArgsMatcher::Any, Times::never()).is_ok());
    }

    #[test]
    fn test_failure_message_lists_recorded_calls() {
        let recorder = recorder_with_writes(2);
        let failure = verify(&recorder, "write", &args![eq("nope")], Times::once()).unwrap_err();
        let message = failure.to_string();

        assert!(message.contains("recorded calls:"));
        assert!(message.contains("#0 write(\"line 0\")"));
        assert!(message.contains("#1 write(\"line 1\")"));
    }

    #[test]
    fn test_verification_reflects_calls_so_far() {
        let mut recorder = InvocationRecorder::new();
        assert!(verify(&recorder, "write", &ArgsMatcher::Any, Times::once()).is_err());

        recorder.record("write", vec![json!("x")], Instant::now());
        assert!(verify(&recorder, "write", &ArgsMatcher::Any, Times::once()).is_ok());

        recorder.record("write", vec![json!("y")], Instant::now());
        assert!(verify(&recorder, "write", &ArgsMatcher::Any, Times::once()).is_err());
    }
}
