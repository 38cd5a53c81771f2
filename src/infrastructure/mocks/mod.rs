//! Test helpers for exercising mock handles themselves.
//!
//! These are doubles for the handle's own collaborators: its clock and the
//! tracing subscriber that receives its diagnostics.

pub mod clock;
pub mod layer;

pub use clock::MockClock;
pub use layer::{CapturedEvent, MockCaptureLayer};
