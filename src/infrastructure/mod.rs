//! Infrastructure layer - adapters at the edges of the mock handle.
//!
//! This layer provides:
//! - Clock abstraction (system time vs mock)
//! - Capability adapters (trait implementations routed through a handle)

pub mod adapter;
pub mod clock;

/// Test helpers for this crate's own collaborators.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds.
///
/// To use these helpers in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// stunt-double = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
