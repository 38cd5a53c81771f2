//! # stunt-double
//!
//! Programmable test doubles for Rust traits.
//!
//! A [`MockHandle`] stands in for a real dependency: test code configures
//! expectations ("when called with X, return Y"), hands the mock to the code
//! under test through a capability adapter, then verifies the recorded calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use stunt_double::{any, args, capability_double, Expectation, Times};
//!
//! pub trait LoggerDependency {
//!     fn get_current_directory(&self) -> String;
//!     fn get_directory_by_logger_name(&self, logger_name: &str) -> String;
//!     fn default_logger(&self) -> String;
//! }
//!
//! capability_double! {
//!     pub struct MockLoggerDependency implements LoggerDependency {
//!         fn get_current_directory(&self) -> String;
//!         fn get_directory_by_logger_name(&self, logger_name: &str) -> String;
//!         fn default_logger(&self) -> String;
//!     }
//! }
//!
//! // Declarative: every expectation up front, the mock is frozen afterwards
//! let logger = MockLoggerDependency::of([
//!     Expectation::on("get_current_directory").returns("D:\\Temp"),
//!     Expectation::on("get_directory_by_logger_name")
//!         .with(args![any()])
//!         .returns("C:\\Temp"),
//! ]);
//!
//! assert_eq!(logger.get_current_directory(), "D:\\Temp");
//! assert_eq!(logger.get_directory_by_logger_name("CustomLogger"), "C:\\Temp");
//!
//! logger
//!     .handle()
//!     .verify("get_directory_by_logger_name", args![any()], Times::once())
//!     .unwrap();
//! ```
//!
//! ## Features
//!
//! ### Argument Matching
//! - **Literal**: `eq(value)` compares encoded values for equality
//! - **Wildcard**: `any()` accepts every value
//! - **Predicate**: `predicate(desc, fn)` over the encoded value, or `is(desc, fn)`
//!   over a decoded typed value
//! - **Whole argument lists**: `args![...]` for positional patterns,
//!   `ArgsMatcher::Any` for "any arguments, any arity"
//!
//! ### Responses
//! - **Fixed values**: `.returns(value)`
//! - **Computed values**: `.returns_with(|(name,): (String,)| ...)`
//! - **Void action**: `.returns_default()`
//! - **Failures**: `.panics(message)`
//!
//! ### Configuration Styles
//! - **Declarative**: `MockHandle::of([...])` freezes the expectation set
//! - **Incremental**: `MockHandle::new()` or `MockHandle::builder()` accept
//!   `add_expectation` at any time, interleaved with calls
//!
//! When several expectations for a method match a call, the most recently
//! registered one wins.
//!
//! ## Strictness
//!
//! Unconfigured calls are answered by an explicit policy:
//!
//! ```rust
//! use stunt_double::{MockError, MockHandle, Strictness};
//!
//! // Lenient (default): the declared type's default value
//! let lenient = MockHandle::new();
//! let value: String = lenient.call_or_default("get_logger", ());
//! assert_eq!(value, "");
//!
//! // Types without a default value fail instead
//! let loaded: Result<Result<String, String>, MockError> = lenient.try_call("load", ());
//! assert!(matches!(loaded, Err(MockError::NoDefault { .. })));
//!
//! // Strict: an error the caller must deal with
//! let strict = MockHandle::builder()
//!     .with_strictness(Strictness::Strict)
//!     .build()
//!     .unwrap();
//! let result: Result<String, MockError> = strict.try_call("get_logger", ());
//! assert!(matches!(result, Err(MockError::UnconfiguredCall { .. })));
//! ```
//!
//! ## Verification
//!
//! Verification counts the recorded calls matching a pattern and checks the
//! count against a [`Times`] constraint. A failure carries the method, the
//! pattern, the constraint, the actual count and the recorded calls:
//!
//! ```rust
//! use stunt_double::{any, args, MockHandle, Times};
//!
//! let writer = MockHandle::new();
//! writer.call::<_, ()>("write", ("Hello, logger!",));
//!
//! let failure = writer
//!     .verify("write", args![any()], Times::at_least(2))
//!     .unwrap_err();
//! assert_eq!(failure.actual, 1);
//! assert!(failure.to_string().contains("at least 2 times"));
//! ```
//!
//! ## Concurrency
//!
//! A handle is single-threaded and uses no internal locking. Wrap it in a
//! `Mutex` if a test needs to share it across threads.
//!
//! ## Diagnostics
//!
//! Handles emit `tracing` events: `trace` for every recorded call, `debug` for
//! registrations, resolutions and verification failures, `warn` when a strict
//! mock rejects a call. Install any subscriber to see them.

// Domain layer - plain values
pub mod domain;

// Application layer - the call pipeline
pub mod application;

// Infrastructure layer - clocks and capability adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    args::{EncodingError, FromArgs, IntoArgs},
    expectation::{Expectation, ExpectationBuilder, Response},
    invocation::InvocationRecord,
    matcher::{any, eq, is, predicate, ArgsMatcher, Matcher},
    times::{ConstraintError, Times},
};

pub use application::{
    handle::{BuildError, DefaultFn, MockBuilder, MockError, MockHandle, Strictness},
    metrics::{Metrics, MetricsSnapshot},
    ports::Clock,
    recorder::InvocationRecorder,
    registry::{ExpectationId, ExpectationRegistry},
    verification::{verify, VerificationFailure},
};

pub use infrastructure::clock::SystemClock;

#[doc(hidden)]
pub use infrastructure::adapter::support as __private;
