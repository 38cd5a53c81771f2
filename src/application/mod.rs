//! Application layer - the call pipeline of a mock.
//!
//! This layer coordinates the domain values at runtime:
//! - Expectation registry (configured rules, most recent first)
//! - Invocation recorder (append-only call history)
//! - Verification (call counts against constraints)
//! - Mock handle (record, resolve, respond)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod handle;
pub mod metrics;
pub mod ports;
pub mod recorder;
pub mod registry;
pub mod verification;
