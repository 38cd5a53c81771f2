//! Argument and response encoding.
//!
//! Calls cross the mock boundary as dynamic values so that one handle can hold
//! expectations for methods of any signature. Typed tuples are converted in and
//! out of the dynamic form with serde.
//!
//! ```
//! use stunt_double::domain::args::{FromArgs, IntoArgs};
//!
//! let args = ("logger", 3u8).into_args().unwrap();
//! assert_eq!(args.len(), 2);
//!
//! let (name, level): (String, u8) = FromArgs::from_args(&args).unwrap();
//! assert_eq!(name, "logger");
//! assert_eq!(level, 3);
//! ```

use crate::domain::value::to_value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Error raised when a value cannot be moved across the mock boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// An argument could not be turned into a dynamic value
    #[error("argument {position} could not be encoded: {reason}")]
    Argument {
        /// Zero-based argument position
        position: usize,
        /// Underlying serde message
        reason: String,
    },
    /// A configured response value could not be turned into a dynamic value
    #[error("response value could not be encoded: {reason}")]
    Response {
        /// Underlying serde message
        reason: String,
    },
    /// A typed argument tuple was decoded from a list of the wrong length
    #[error("expected {expected} arguments, got {actual}")]
    Arity {
        /// Length of the typed tuple
        expected: usize,
        /// Length of the actual argument list
        actual: usize,
    },
    /// An argument could not be decoded into the requested type
    #[error("argument {position} could not be decoded as {type_name}: {reason}")]
    Decode {
        /// Zero-based argument position
        position: usize,
        /// Name of the requested type
        type_name: &'static str,
        /// Underlying serde message
        reason: String,
    },
}

/// Conversion of a typed argument tuple into the dynamic argument list.
pub trait IntoArgs {
    /// Encode every argument, in order.
    fn into_args(self) -> Result<Vec<Value>, EncodingError>;
}

/// Conversion of the dynamic argument list back into a typed tuple.
pub trait FromArgs: Sized {
    /// Decode the arguments; the list length must equal the tuple length.
    fn from_args(args: &[Value]) -> Result<Self, EncodingError>;
}

impl IntoArgs for Vec<Value> {
    fn into_args(self) -> Result<Vec<Value>, EncodingError> {
        Ok(self)
    }
}

/// Encode a response value.
pub fn encode_response<T: Serialize>(value: &T) -> Result<Value, EncodingError> {
    to_value(value).map_err(|e| EncodingError::Response {
        reason: e.to_string(),
    })
}

fn encode_at<T: Serialize>(position: usize, value: &T) -> Result<Value, EncodingError> {
    to_value(value).map_err(|e| EncodingError::Argument {
        position,
        reason: e.to_string(),
    })
}

fn decode_at<T: DeserializeOwned>(position: usize, value: &Value) -> Result<T, EncodingError> {
    T::deserialize(value).map_err(|e| EncodingError::Decode {
        position,
        type_name: std::any::type_name::<T>(),
        reason: e.to_string(),
    })
}

fn check_arity(expected: usize, args: &[Value]) -> Result<(), EncodingError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EncodingError::Arity {
            expected,
            actual: args.len(),
        })
    }
}

macro_rules! tuple_args {
    ($len:expr; $($name:ident : $idx:tt),*) => {
        impl<$($name: Serialize),*> IntoArgs for ($($name,)*) {
            #[allow(unused_variables)]
            fn into_args(self) -> Result<Vec<Value>, EncodingError> {
                Ok(vec![$(encode_at($idx, &self.$idx)?),*])
            }
        }

        impl<$($name: DeserializeOwned),*> FromArgs for ($($name,)*) {
            fn from_args(args: &[Value]) -> Result<Self, EncodingError> {
                check_arity($len, args)?;
                Ok(($(decode_at::<$name>($idx, &args[$idx])?,)*))
            }
        }
    };
}

tuple_args!(0;);
tuple_args!(1; A: 0);
tuple_args!(2; A: 0, B: 1);
tuple_args!(3; A: 0, B: 1, C: 2);
tuple_args!(4; A: 0, B: 1, C: 2, D: 3);
tuple_args!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
tuple_args!(6; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
tuple_args!(7; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
tuple_args!(8; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

/// Render an argument list as a call suffix, e.g. `("xyz", 3)`.
pub fn describe_args(args: &[Value]) -> String {
    let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
    format!("({})", rendered.join(", "))
}
