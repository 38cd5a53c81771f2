//! Argument matching.
//!
//! A [`Matcher`] decides whether one actual argument satisfies one position of a
//! call pattern. An [`ArgsMatcher`] lifts that to a whole argument list.

use crate::domain::value::to_value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Predicate over a single encoded argument.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync + 'static>;

/// Matcher for a single argument position.
#[derive(Clone)]
pub enum Matcher {
    /// Matches an argument equal to the value
    Literal(Value),
    /// Matches any argument
    Any,
    /// Matches arguments accepted by the predicate
    Predicate {
        /// Shown in diagnostics in place of the predicate
        description: Cow<'static, str>,
        /// The predicate itself
        test: PredicateFn,
    },
}

impl Matcher {
    /// Check a single argument against this matcher.
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Matcher::Literal(expected) => expected == actual,
            Matcher::Any => true,
            Matcher::Predicate { test, .. } => test(actual),
        }
    }

    /// Human-readable form used in failure messages.
    pub fn describe(&self) -> String {
        match self {
            Matcher::Literal(value) => value.to_string(),
            Matcher::Any => "any".to_string(),
            Matcher::Predicate { description, .. } => format!("<{}>", description),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Matcher::Any => f.write_str("Any"),
            Matcher::Predicate { description, .. } => f
                .debug_struct("Predicate")
                .field("description", description)
                .field("test", &"<fn>")
                .finish(),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Match an argument equal to `value`.
///
/// A value that cannot be encoded (including NaN and the infinities) yields a
/// matcher that never matches; its description carries the encoding error.
pub fn eq<T: Serialize>(value: T) -> Matcher {
    match to_value(&value) {
        Ok(value) => Matcher::Literal(value),
        Err(e) => Matcher::Predicate {
            description: Cow::Owned(format!("unencodable literal: {}", e)),
            test: Arc::new(|_: &Value| false),
        },
    }
}

/// Match any argument.
pub fn any() -> Matcher {
    Matcher::Any
}

/// Match arguments accepted by a predicate over the encoded value.
pub fn predicate<F>(description: impl Into<Cow<'static, str>>, test: F) -> Matcher
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Matcher::Predicate {
        description: description.into(),
        test: Arc::new(test),
    }
}

/// Match arguments that decode into `T` and satisfy `test`.
///
/// ```
/// use stunt_double::domain::matcher::is;
/// use serde_json::json;
///
/// let short = is("shorter than 5", |name: &String| name.len() < 5);
/// assert!(short.matches(&json!("abc")));
/// assert!(!short.matches(&json!("abcdef")));
/// assert!(!short.matches(&json!(42)));
/// ```
pub fn is<T, F>(description: impl Into<Cow<'static, str>>, test: F) -> Matcher
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    predicate(description, move |value| {
        T::deserialize(value).map(|typed| test(&typed)).unwrap_or(false)
    })
}

/// Matcher for a complete argument list.
#[derive(Debug, Clone, Default)]
pub enum ArgsMatcher {
    /// Matches every argument list, whatever its length
    #[default]
    Any,
    /// One matcher per argument position; the lengths must agree
    Positional(Vec<Matcher>),
}

impl ArgsMatcher {
    /// Check an actual argument list.
    ///
    /// An arity mismatch is a plain non-match.
    pub fn matches(&self, actual: &[Value]) -> bool {
        match self {
            ArgsMatcher::Any => true,
            ArgsMatcher::Positional(matchers) => {
                matchers.len() == actual.len()
                    && matchers.iter().zip(actual).all(|(m, a)| m.matches(a))
            }
        }
    }

    /// Number of arguments this matcher expects, if it constrains it.
    pub fn arity(&self) -> Option<usize> {
        match self {
            ArgsMatcher::Any => None,
            ArgsMatcher::Positional(matchers) => Some(matchers.len()),
        }
    }

    /// Human-readable form used in failure messages, e.g. `("xyz", any)`.
    pub fn describe(&self) -> String {
        match self {
            ArgsMatcher::Any => "(..)".to_string(),
            ArgsMatcher::Positional(matchers) => {
                let parts: Vec<String> = matchers.iter().map(Matcher::describe).collect();
                format!("({})", parts.join(", "))
            }
        }
    }
}

impl fmt::Display for ArgsMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<Vec<Matcher>> for ArgsMatcher {
    fn from(matchers: Vec<Matcher>) -> Self {
        ArgsMatcher::Positional(matchers)
    }
}

impl From<Matcher> for ArgsMatcher {
    fn from(matcher: Matcher) -> Self {
        ArgsMatcher::Positional(vec![matcher])
    }
}

/// Build a positional [`ArgsMatcher`](crate::ArgsMatcher) from matchers.
///
/// ```
/// use stunt_double::{any, args, eq};
/// use serde_json::json;
///
/// let pattern = args![eq("C:\\Temp"), any()];
/// assert!(pattern.matches(&[json!("C:\\Temp"), json!(7)]));
/// assert!(!pattern.matches(&[json!("D:\\Temp"), json!(7)]));
///
/// // No arguments at all
/// assert!(args![].matches(&[]));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::ArgsMatcher::Positional(::std::vec::Vec::new())
    };
    ($($matcher:expr),+ $(,)?) => {
        $crate::ArgsMatcher::Positional(::std::vec![$($matcher),+])
    };
}
