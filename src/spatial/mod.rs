//! Spatial data structures for the mosaic
//!
//! This module contains:
//! - The cell grid of assignments and source signatures
//! - The rendered tile canvas

/// Full-resolution canvas rendering
pub mod canvas;
/// Grid construction and cell assignment state
pub mod grid;

pub use canvas::Canvas;
pub use grid::{Cell, MosaicGrid};
