//! Greedy photomosaic construction with interactive tile substitution
//!
//! A corpus of images is summarised by average color signatures. Each cell of
//! a downsampled target is matched, in raster order, to the nearest corpus
//! image that is not cooling down from a recent placement. An editing session
//! then lets an operator select cells and step through alternate matches.

#![forbid(unsafe_code)]

/// Matching and per-cell alternate history
pub mod algorithm;
/// Corpus color-signature index
pub mod index;
/// Input/output operations, configuration and error handling
pub mod io;
/// Interactive editing session
pub mod session;
/// Cell grid and rendered canvas
pub mod spatial;

pub use io::error::{MosaicError, Result};
