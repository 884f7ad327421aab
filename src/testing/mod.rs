//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to programmatically drive a
//! [`WindowController`](crate::window::WindowController) without a real
//! terminal. Use [`frames_to_string`] to capture a laid-out tree as plain
//! text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{frames_to_string, view_label, RecordingRenderer};
