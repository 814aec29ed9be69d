//! Interactive substitution session
//!
//! This module contains:
//! - Input events and their script syntax
//! - The selection and the pending weight input
//! - Preview composition and the display seam
//! - The editing state machine

/// Screen trait and scripted implementation
pub mod display;
/// Session state machine and command dispatch
pub mod editor;
/// Input event types and script parsing
pub mod events;
/// Preview geometry and frame composition
pub mod preview;
/// Rectangle-drag selection
pub mod selection;
/// Pending weight text input
pub mod weight_buffer;

pub use editor::{EditSession, Response, SessionState};
