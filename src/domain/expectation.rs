//! Expectations: configured rules mapping a call pattern to a response.
//!
//! An expectation is immutable once built. Later expectations for the same
//! method supersede earlier ones when both match a call.
//!
//! # Example
//! ```
//! use stunt_double::{any, args, Expectation};
//!
//! let fixed = Expectation::on("get_directory_by_logger_name")
//!     .with(args![any()])
//!     .returns("C:\\Foo");
//!
//! let computed = Expectation::on("get_directory_by_logger_name")
//!     .with(args![any()])
//!     .returns_with(|(name,): (String,)| format!("C:\\{}", name));
//!
//! assert_eq!(fixed.describe(), "get_directory_by_logger_name(any)");
//! assert_eq!(computed.method(), "get_directory_by_logger_name");
//! ```

use crate::domain::args::{encode_response, EncodingError, FromArgs};
use crate::domain::matcher::ArgsMatcher;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Response computed from the actual call arguments.
pub type ResponseFn = Arc<dyn Fn(&[Value]) -> Result<Value, EncodingError> + Send + Sync + 'static>;

/// What a matched call produces.
#[derive(Clone)]
pub enum Response {
    /// A fixed value, decoded into the declared return type on every call
    Value(Value),
    /// A function of the actual arguments
    Computed(ResponseFn),
    /// The declared return type's default; the void-action for unit methods
    Default,
    /// The call fails with this message
    Panic(Cow<'static, str>),
    /// The configured value could not be encoded; the call fails with this error
    Invalid(EncodingError),
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Response::Computed(_) => f.write_str("Computed(<fn>)"),
            Response::Default => f.write_str("Default"),
            Response::Panic(message) => f.debug_tuple("Panic").field(message).finish(),
            Response::Invalid(e) => f.debug_tuple("Invalid").field(e).finish(),
        }
    }
}

/// A configured rule: method identity, argument pattern and response.
#[derive(Debug, Clone)]
pub struct Expectation {
    method: Cow<'static, str>,
    args: ArgsMatcher,
    response: Response,
}

impl Expectation {
    /// Start building an expectation for `method`.
    pub fn on(method: impl Into<Cow<'static, str>>) -> ExpectationBuilder {
        ExpectationBuilder {
            method: method.into(),
            args: ArgsMatcher::Any,
        }
    }

    /// Method this expectation applies to.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Argument pattern.
    pub fn args(&self) -> &ArgsMatcher {
        &self.args
    }

    /// Configured response.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Whether this expectation applies to a call.
    pub fn matches(&self, method: &str, args: &[Value]) -> bool {
        self.method == method && self.args.matches(args)
    }

    /// Human-readable call pattern, e.g. `write("hello")`.
    pub fn describe(&self) -> String {
        format!("{}{}", self.method, self.args.describe())
    }
}

/// Builder returned by [`Expectation::on`].
///
/// Without a call to [`with`](Self::with) the expectation matches every
/// argument list.
#[derive(Debug, Clone)]
#[must_use = "an expectation is only created once a response is chosen"]
pub struct ExpectationBuilder {
    method: Cow<'static, str>,
    args: ArgsMatcher,
}

impl ExpectationBuilder {
    /// Restrict the expectation to matching argument lists.
    pub fn with(mut self, args: impl Into<ArgsMatcher>) -> Self {
        self.args = args.into();
        self
    }

    /// Respond with a fixed value.
    pub fn returns<T: Serialize>(self, value: T) -> Expectation {
        let response = match encode_response(&value) {
            Ok(value) => Response::Value(value),
            Err(e) => Response::Invalid(e),
        };
        self.finish(response)
    }

    /// Respond with a function of the actual arguments, decoded as a typed tuple.
    pub fn returns_with<A, R, F>(self, f: F) -> Expectation
    where
        A: FromArgs,
        R: Serialize,
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let computed: ResponseFn = Arc::new(move |args: &[Value]| {
            let typed = A::from_args(args)?;
            encode_response(&f(typed))
        });
        self.finish(Response::Computed(computed))
    }

    /// Respond with the declared return type's default value.
    pub fn returns_default(self) -> Expectation {
        self.finish(Response::Default)
    }

    /// Fail the call with a message.
    pub fn panics(self, message: impl Into<Cow<'static, str>>) -> Expectation {
        self.finish(Response::Panic(message.into()))
    }

    fn finish(self, response: Response) -> Expectation {
        Expectation {
            method: self.method,
            args: self.args,
            response,
        }
    }
}
