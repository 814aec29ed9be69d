//! Input/output operations and error handling
//!
//! This module contains:
//! - Command-line parsing and subcommand execution
//! - Configuration defaults
//! - Image decoding, resampling and color conversion
//! - Mosaic descriptor persistence
//! - Progress reporting

/// Command-line interface
pub mod cli;
/// Constants and per-run configuration
pub mod configuration;
/// Mosaic descriptor read/write
pub mod descriptor;
/// Error types
pub mod error;
/// Image collaborator helpers
pub mod image;
/// Progress bars for batch phases
pub mod progress;
