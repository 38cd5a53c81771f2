//! Domain layer - plain values with no knowledge of mock handles.
//!
//! This layer contains the vocabulary of the test-double system:
//! - Argument encoding between typed tuples and dynamic values
//! - Argument matchers
//! - Expectations and their responses
//! - Invocation records
//! - Call-count constraints
//!
//! All types in this layer are pure and easily testable.

pub mod args;
pub mod expectation;
pub mod invocation;
pub mod matcher;
pub mod times;
pub(crate) mod value;
