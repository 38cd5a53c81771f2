//! Mock handles: the call pipeline behind every capability adapter.
//!
//! A [`MockHandle`] owns one expectation registry and one invocation recorder.
//! Every call routed through it is recorded, resolved against the registry and
//! answered with the configured response, or handled by the strictness policy
//! when nothing matches.
//!
//! # Example
//! ```
//! use stunt_double::{any, args, Expectation, MockHandle, Times};
//!
//! let handle = MockHandle::new();
//! handle
//!     .add_expectation(
//!         Expectation::on("get_directory_by_logger_name")
//!             .with(args![any()])
//!             .returns_with(|(name,): (String,)| format!("C:\\{}", name)),
//!     )
//!     .unwrap();
//!
//! let dir: String = handle.call("get_directory_by_logger_name", ("hren",));
//! assert_eq!(dir, "C:\\hren");
//!
//! handle
//!     .verify("get_directory_by_logger_name", args![any()], Times::once())
//!     .unwrap();
//! ```

use crate::application::metrics::Metrics;
use crate::application::ports::Clock;
use crate::application::recorder::InvocationRecorder;
use crate::application::registry::{ExpectationId, ExpectationRegistry};
use crate::application::verification::{self, VerificationFailure};
use crate::domain::args::{describe_args, EncodingError, IntoArgs};
use crate::domain::expectation::{Expectation, Response};
use crate::domain::invocation::InvocationRecord;
use crate::domain::matcher::ArgsMatcher;
use crate::domain::times::Times;
use crate::infrastructure::clock::SystemClock;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::future::{ready, Ready};
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_NAME: &str = "mock";

/// Policy for calls that match no expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Return the declared type's default value
    #[default]
    Lenient,
    /// Fail the call with `MockError::UnconfiguredCall`
    Strict,
}

/// Error raised by the call pipeline or by configuration of a handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// A strict mock received a call no expectation matches
    #[error("{mock}: unconfigured call {method}{args}")]
    UnconfiguredCall {
        /// Name of the mock
        mock: String,
        /// Called method
        method: String,
        /// Rendered arguments
        args: String,
    },
    /// A call's argument count disagrees with the configured pattern
    #[error("{mock}: {method} was configured with {expected} argument(s) but called with {actual}")]
    ArityMismatch {
        /// Name of the mock
        mock: String,
        /// Called method
        method: String,
        /// Arity of the configured pattern
        expected: usize,
        /// Arity of the actual call
        actual: usize,
    },
    /// The configured response does not decode into the declared return type
    #[error("{mock}: response for {method} does not fit the return type {type_name}: {reason}")]
    ResponseType {
        /// Name of the mock
        mock: String,
        /// Called method
        method: String,
        /// Declared return type
        type_name: &'static str,
        /// Underlying serde message
        reason: String,
    },
    /// Arguments or a response could not be encoded or decoded
    #[error("{mock}: {method}: {source}")]
    Encoding {
        /// Name of the mock
        mock: String,
        /// Called method
        method: String,
        /// What went wrong
        #[source]
        source: EncodingError,
    },
    /// The matched expectation is configured to fail
    #[error("{mock}: {method} failed: {message}")]
    Panicked {
        /// Name of the mock
        mock: String,
        /// Called method
        method: String,
        /// Configured message
        message: String,
    },
    /// A default value was called for, but the return type has none
    #[error("{mock}: {method} needs a default value, but {type_name} has none")]
    NoDefault {
        /// Name of the mock
        mock: String,
        /// Called method
        method: String,
        /// Declared return type
        type_name: &'static str,
    },
    /// Expectations cannot be added to a mock built in declarative form
    #[error("{mock}: cannot add expectations to a frozen mock")]
    Frozen {
        /// Name of the mock
        mock: String,
    },
}

/// Error returned when building a `MockHandle` fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The mock name must not be empty
    #[error("mock name must not be empty")]
    EmptyName,
}

/// Builder for constructing a `MockHandle`.
pub struct MockBuilder {
    name: Cow<'static, str>,
    strictness: Strictness,
    arity_checking: bool,
    frozen: bool,
    clock: Option<Arc<dyn Clock>>,
    expectations: Vec<Expectation>,
}

impl MockBuilder {
    /// Name the mock; the name prefixes every error and log event.
    ///
    /// The value will be validated when `build()` is called.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the policy for unconfigured calls.
    ///
    /// Default: `Strictness::Lenient`
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Shorthand for `with_strictness(Strictness::Strict)`.
    pub fn strict(self) -> Self {
        self.with_strictness(Strictness::Strict)
    }

    /// Report unmatched calls whose argument count no expectation for the
    /// method accepts as `MockError::ArityMismatch`, instead of treating them
    /// as unconfigured.
    ///
    /// Default: disabled
    pub fn with_arity_checking(mut self, enabled: bool) -> Self {
        self.arity_checking = enabled;
        self
    }

    /// Set a custom clock (mainly for testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Register one expectation at construction.
    pub fn with_expectation(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Register expectations at construction, in iteration order.
    pub fn with_expectations<I>(mut self, expectations: I) -> Self
    where
        I: IntoIterator<Item = Expectation>,
    {
        self.expectations.extend(expectations);
        self
    }

    /// Reject any expectation added after `build()`.
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Build the handle.
    ///
    /// # Errors
    /// Returns `BuildError::EmptyName` if the name is empty.
    pub fn build(self) -> Result<MockHandle, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::EmptyName);
        }

        let mut registry = ExpectationRegistry::new();
        for expectation in self.expectations {
            registry.add_expectation(expectation);
        }

        Ok(MockHandle {
            name: self.name,
            strictness: self.strictness,
            arity_checking: self.arity_checking,
            frozen: self.frozen,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock::new())),
            registry: RefCell::new(registry),
            recorder: RefCell::new(InvocationRecorder::new()),
            metrics: Metrics::new(),
        })
    }
}

impl Default for MockBuilder {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed(DEFAULT_NAME),
            strictness: Strictness::Lenient,
            arity_checking: false,
            frozen: false,
            clock: None,
            expectations: Vec::new(),
        }
    }
}

/// Programmable substitute for a capability.
///
/// A handle is single-threaded: it uses no internal locking. Consumers that
/// need to share one across threads must wrap it in a `Mutex` themselves.
pub struct MockHandle {
    name: Cow<'static, str>,
    strictness: Strictness,
    arity_checking: bool,
    frozen: bool,
    clock: Arc<dyn Clock>,
    registry: RefCell<ExpectationRegistry>,
    recorder: RefCell<InvocationRecorder>,
    metrics: Metrics,
}

enum Resolution {
    Matched(ExpectationId, Response),
    Unmatched { conflicting_arity: Option<usize> },
}

/// Supplier of a return type's default value, when the type has one.
pub type DefaultFn<R> = fn() -> R;

impl MockHandle {
    /// Create a lenient handle that accepts expectations at any time.
    ///
    /// Equivalent to `MockHandle::builder().build().unwrap()`.
    ///
    /// # Panics
    /// This method cannot panic because the default configuration is valid.
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("default configuration is always valid")
    }

    /// Create a lenient, incrementally configured handle with a name.
    ///
    /// # Panics
    /// Panics if the name is empty, like `MockBuilder::build` rejects it.
    #[track_caller]
    pub fn new_named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::built_or_panic(Self::builder().with_name(name))
    }

    /// Create a lenient handle whose expectations are all declared up front.
    ///
    /// The handle is frozen: `add_expectation` fails with `MockError::Frozen`.
    pub fn of<I>(expectations: I) -> Self
    where
        I: IntoIterator<Item = Expectation>,
    {
        Self::of_named(DEFAULT_NAME, expectations)
    }

    /// Like [`of`](Self::of), with a name.
    ///
    /// # Panics
    /// Panics if the name is empty.
    #[track_caller]
    pub fn of_named<I>(name: impl Into<Cow<'static, str>>, expectations: I) -> Self
    where
        I: IntoIterator<Item = Expectation>,
    {
        Self::built_or_panic(
            Self::builder()
                .with_name(name)
                .with_expectations(expectations)
                .frozen(),
        )
    }

    #[track_caller]
    fn built_or_panic(builder: MockBuilder) -> Self {
        match builder.build() {
            Ok(handle) => handle,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a builder for configuring a handle.
    pub fn builder() -> MockBuilder {
        MockBuilder::default()
    }

    /// Name of this mock.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Policy for unconfigured calls.
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Whether expectations can still be added.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Usage metrics; clones share counters with this handle.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Register an expectation.
    ///
    /// It takes precedence over every earlier expectation for the same method
    /// that also matches a call.
    ///
    /// # Errors
    /// Returns `MockError::Frozen` if the handle was built in declarative form.
    pub fn add_expectation(&self, expectation: Expectation) -> Result<ExpectationId, MockError> {
        if self.frozen {
            return Err(MockError::Frozen {
                mock: self.name.to_string(),
            });
        }
        let pattern = expectation.describe();
        let id = self.registry.borrow_mut().add_expectation(expectation);
        tracing::debug!(mock = %self.name, expectation = %id, pattern = %pattern, "expectation registered");
        Ok(id)
    }

    /// Number of registered expectations.
    pub fn expectation_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Route a call through the mock.
    ///
    /// The call is recorded first, then resolved. A matched expectation's
    /// response is decoded into `R`; an unmatched call is answered by the
    /// strictness policy.
    ///
    /// No default value of `R` is known here. Where one is needed (a lenient
    /// unconfigured call, or `returns_default`) the call succeeds only if `R`
    /// decodes from `null`, as `()` and `Option<T>` do. Use
    /// [`try_call_or_default`](Self::try_call_or_default) for other types.
    ///
    /// # Errors
    /// - `MockError::Encoding` if the arguments cannot be encoded (the call is
    ///   not recorded) or a computed response fails
    /// - `MockError::ResponseType` if the response does not decode into `R`
    /// - `MockError::Panicked` if the matched expectation is configured to fail
    /// - `MockError::ArityMismatch` if arity checking is enabled and no
    ///   expectation for the method accepts the call's argument count
    /// - `MockError::UnconfiguredCall` if the handle is strict and nothing matched
    /// - `MockError::NoDefault` if a default value is needed and `R` has none
    pub fn try_call<A, R>(&self, method: &str, args: A) -> Result<R, MockError>
    where
        A: IntoArgs,
        R: DeserializeOwned,
    {
        self.try_call_with_default(method, args, None)
    }

    /// Like [`try_call`](Self::try_call), answering with `R::default()`
    /// wherever a default value is needed.
    ///
    /// # Errors
    /// As `try_call`, but never `MockError::NoDefault`.
    pub fn try_call_or_default<A, R>(&self, method: &str, args: A) -> Result<R, MockError>
    where
        A: IntoArgs,
        R: DeserializeOwned + Default,
    {
        self.try_call_with_default(method, args, Some(R::default as DefaultFn<R>))
    }

    /// Route a call with an explicit default supplier.
    ///
    /// `None` behaves as [`try_call`](Self::try_call), `Some(R::default)` as
    /// [`try_call_or_default`](Self::try_call_or_default). Capability adapters
    /// pick the supplier per return type.
    ///
    /// # Errors
    /// See [`try_call`](Self::try_call).
    pub fn try_call_with_default<A, R>(
        &self,
        method: &str,
        args: A,
        default: Option<DefaultFn<R>>,
    ) -> Result<R, MockError>
    where
        A: IntoArgs,
        R: DeserializeOwned,
    {
        let args = args
            .into_args()
            .map_err(|source| self.encoding_error(method, source))?;

        let now = self.clock.now();
        let seq = self
            .recorder
            .borrow_mut()
            .record(method, args.clone(), now);
        self.metrics.record_call();
        tracing::trace!(mock = %self.name, method, seq, "call recorded");

        let resolution = self.resolve(method, &args);

        match resolution {
            Resolution::Matched(id, response) => {
                self.metrics.record_matched();
                tracing::debug!(mock = %self.name, method, seq, expectation = %id, "call matched");
                self.respond(method, &args, response, default)
            }
            Resolution::Unmatched { conflicting_arity } => {
                self.metrics.record_unconfigured();
                self.unconfigured(method, &args, conflicting_arity, default)
            }
        }
    }

    /// Route a call through the mock, panicking on any `MockError`.
    ///
    /// The panic fails the surrounding test; it is how errors surface through
    /// operations that cannot return them.
    #[track_caller]
    pub fn call<A, R>(&self, method: &str, args: A) -> R
    where
        A: IntoArgs,
        R: DeserializeOwned,
    {
        self.call_with_default(method, args, None)
    }

    /// Like [`call`](Self::call), answering with `R::default()` wherever a
    /// default value is needed.
    #[track_caller]
    pub fn call_or_default<A, R>(&self, method: &str, args: A) -> R
    where
        A: IntoArgs,
        R: DeserializeOwned + Default,
    {
        self.call_with_default(method, args, Some(R::default as DefaultFn<R>))
    }

    /// Panicking form of [`try_call_with_default`](Self::try_call_with_default);
    /// this is what [`capability_double!`](crate::capability_double) expands to.
    #[track_caller]
    pub fn call_with_default<A, R>(&self, method: &str, args: A, default: Option<DefaultFn<R>>) -> R
    where
        A: IntoArgs,
        R: DeserializeOwned,
    {
        match self.try_call_with_default(method, args, default) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }

    /// Route a call for an async operation; the result is already complete.
    #[track_caller]
    pub fn call_ready<A, R>(&self, method: &str, args: A) -> Ready<R>
    where
        A: IntoArgs,
        R: DeserializeOwned,
    {
        ready(self.call(method, args))
    }

    /// Like [`call_ready`](Self::call_ready), answering with `R::default()`
    /// wherever a default value is needed.
    #[track_caller]
    pub fn call_ready_or_default<A, R>(&self, method: &str, args: A) -> Ready<R>
    where
        A: IntoArgs,
        R: DeserializeOwned + Default,
    {
        ready(self.call_or_default(method, args))
    }

    /// Check how often calls to `method` matching `matcher` were made so far.
    ///
    /// # Errors
    /// Returns a `VerificationFailure` describing the method, matcher, expected
    /// bounds and actual count.
    #[must_use = "a verification failure must be reported, not dropped"]
    pub fn verify(
        &self,
        method: &str,
        matcher: impl Into<ArgsMatcher>,
        expected: Times,
    ) -> Result<(), VerificationFailure> {
        let matcher = matcher.into();
        let result = verification::verify(&self.recorder.borrow(), method, &matcher, expected);
        if let Err(failure) = &result {
            self.metrics.record_verification_failure();
            tracing::debug!(
                mock = %self.name,
                method,
                expected = %failure.expected,
                actual = failure.actual,
                "verification failed"
            );
        }
        result
    }

    /// Like [`verify`](Self::verify), but panics with the failure message.
    #[track_caller]
    pub fn assert_called(&self, method: &str, matcher: impl Into<ArgsMatcher>, expected: Times) {
        if let Err(failure) = self.verify(method, matcher, expected) {
            panic!("{}: {}", self.name, failure);
        }
    }

    /// Number of calls to `method` matching `matcher` so far.
    pub fn call_count(&self, method: &str, matcher: impl Into<ArgsMatcher>) -> usize {
        self.recorder.borrow().query(method, &matcher.into())
    }

    /// Snapshot of the call history, in call order.
    pub fn invocations(&self) -> Vec<InvocationRecord> {
        self.recorder.borrow().records().to_vec()
    }

    fn resolve(&self, method: &str, args: &[Value]) -> Resolution {
        let registry = self.registry.borrow();
        match registry.resolve(method, args) {
            Some((id, expectation)) => Resolution::Matched(id, expectation.response().clone()),
            None => Resolution::Unmatched {
                conflicting_arity: registry.conflicting_arity(method, args.len()),
            },
        }
    }

    fn respond<R>(
        &self,
        method: &str,
        args: &[Value],
        response: Response,
        default: Option<DefaultFn<R>>,
    ) -> Result<R, MockError>
    where
        R: DeserializeOwned,
    {
        match response {
            Response::Value(value) => self.decode_response(method, value),
            Response::Computed(f) => {
                let value = f(args).map_err(|source| self.encoding_error(method, source))?;
                self.decode_response(method, value)
            }
            Response::Default => self.default_value(method, default),
            Response::Panic(message) => Err(MockError::Panicked {
                mock: self.name.to_string(),
                method: method.to_owned(),
                message: message.into_owned(),
            }),
            Response::Invalid(source) => Err(self.encoding_error(method, source)),
        }
    }

    fn unconfigured<R: DeserializeOwned>(
        &self,
        method: &str,
        args: &[Value],
        conflicting_arity: Option<usize>,
        default: Option<DefaultFn<R>>,
    ) -> Result<R, MockError> {
        if self.arity_checking {
            if let Some(expected) = conflicting_arity {
                tracing::warn!(mock = %self.name, method, expected, actual = args.len(), "arity mismatch");
                return Err(MockError::ArityMismatch {
                    mock: self.name.to_string(),
                    method: method.to_owned(),
                    expected,
                    actual: args.len(),
                });
            }
        }

        match self.strictness {
            Strictness::Lenient => {
                tracing::debug!(mock = %self.name, method, "unconfigured call, returning default");
                self.default_value(method, default)
            }
            Strictness::Strict => {
                let rendered = describe_args(args);
                tracing::warn!(mock = %self.name, method, args = %rendered, "unconfigured call rejected");
                Err(MockError::UnconfiguredCall {
                    mock: self.name.to_string(),
                    method: method.to_owned(),
                    args: rendered,
                })
            }
        }
    }

    /// `R`'s default, from the supplier or else decoded from `null`.
    fn default_value<R: DeserializeOwned>(
        &self,
        method: &str,
        default: Option<DefaultFn<R>>,
    ) -> Result<R, MockError> {
        if let Some(default) = default {
            return Ok(default());
        }
        R::deserialize(Value::Null).map_err(|_| MockError::NoDefault {
            mock: self.name.to_string(),
            method: method.to_owned(),
            type_name: std::any::type_name::<R>(),
        })
    }

    fn decode_response<R: DeserializeOwned>(&self, method: &str, value: Value) -> Result<R, MockError> {
        serde_json::from_value(value).map_err(|e| MockError::ResponseType {
            mock: self.name.to_string(),
            method: method.to_owned(),
            type_name: std::any::type_name::<R>(),
            reason: e.to_string(),
        })
    }

    fn encoding_error(&self, method: &str, source: EncodingError) -> MockError {
        MockError::Encoding {
            mock: self.name.to_string(),
            method: method.to_owned(),
            source,
        }
    }
}

impl Default for MockHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockHandle")
            .field("name", &self.name)
            .field("strictness", &self.strictness)
            .field("arity_checking", &self.arity_checking)
            .field("frozen", &self.frozen)
            .field("expectations", &self.registry.borrow().len())
            .field("invocations", &self.recorder.borrow().len())
            .finish()
    }
}
