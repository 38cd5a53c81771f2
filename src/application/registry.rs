//! Registry of configured expectations.
//!
//! The registry keeps, per method, the expectations in registration order and
//! resolves calls against them most-recent-first.

use crate::domain::expectation::Expectation;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier assigned to an expectation when it is registered.
///
/// Identifiers increase with registration order within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpectationId(u64);

impl ExpectationId {
    /// Get the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpectationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered store of expectations for one mock.
#[derive(Debug, Default)]
pub struct ExpectationRegistry {
    by_method: BTreeMap<String, Vec<(ExpectationId, Expectation)>>,
    next_id: u64,
}

impl ExpectationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expectation to its method's list.
    pub fn add_expectation(&mut self, expectation: Expectation) -> ExpectationId {
        let id = ExpectationId(self.next_id);
        self.next_id += 1;
        self.by_method
            .entry(expectation.method().to_owned())
            .or_default()
            .push((id, expectation));
        id
    }

    /// Find the most recently registered expectation matching a call.
    ///
    /// Returns `None` when the call is not configured.
    pub fn resolve(&self, method: &str, args: &[Value]) -> Option<(ExpectationId, &Expectation)> {
        self.by_method
            .get(method)?
            .iter()
            .rev()
            .find(|(_, expectation)| expectation.args().matches(args))
            .map(|(id, expectation)| (*id, expectation))
    }

    /// Arity of the most recent expectation for `method` when no expectation
    /// for it accepts `actual` arguments.
    ///
    /// An expectation without a positional pattern accepts every arity, so its
    /// presence rules out a conflict. Used to report arity mismatches when a
    /// call matched nothing.
    pub fn conflicting_arity(&self, method: &str, actual: usize) -> Option<usize> {
        let expectations = self.by_method.get(method)?;
        let compatible = expectations
            .iter()
            .any(|(_, expectation)| expectation.args().arity().map_or(true, |n| n == actual));
        if compatible {
            return None;
        }
        expectations
            .iter()
            .rev()
            .find_map(|(_, expectation)| expectation.args().arity())
    }

    /// Expectations registered for `method`, oldest first.
    pub fn expectations_for<'a>(
        &'a self,
        method: &str,
    ) -> impl Iterator<Item = &'a Expectation> + 'a {
        self.by_method
            .get(method)
            .into_iter()
            .flatten()
            .map(|(_, expectation)| expectation)
    }

    /// Total number of registered expectations.
    pub fn len(&self) -> usize {
        self.by_method.values().map(Vec::len).sum()
    }

    /// Check if no expectation is registered.
    pub fn is_empty(&self) -> bool {
        self.by_method.is_empty()
    }
}
