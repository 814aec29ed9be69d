//! Mosaic constants and runtime configuration defaults

use std::path::PathBuf;

// Grid construction
/// Nominal number of cells along the larger side of the target
pub const DEFAULT_TILE_COUNT: u32 = 56;
/// Pixels per cell on the rendered canvas (10.8mm at 300dpi)
pub const DEFAULT_CELL_PIXELS: u32 = 128;

// Matching
/// Per-channel divisors for the luma/chroma distance, ordered (Y, Cr, Cb)
pub const DEFAULT_DISTANCE_WEIGHTS: [u32; 3] = [4, 8, 12];
/// Cooldown is `tile_count * NUMERATOR / DENOMINATOR` matcher passes
pub const COOLDOWN_NUMERATOR: u32 = 3;
/// See [`COOLDOWN_NUMERATOR`]
pub const COOLDOWN_DENOMINATOR: u32 = 2;

// Corpus layout
/// Name of the signature file inside the corpus directory
pub const INDEX_FILE_NAME: &str = "tile_index";
/// Corpus directory members that are never treated as images
pub const AUXILIARY_FILE_NAMES: [&str; 2] = ["wget.sh", "wget.py"];

// Interactive session
/// Canvas is downscaled by an integer factor to roughly this height for display
pub const PREVIEW_TARGET_HEIGHT: u32 = 800;
/// Capacity of the pending weight input buffer before it wraps
pub const WEIGHT_BUFFER_CAPACITY: usize = 127;
/// Outline color for selected cells
pub const SELECTION_OUTLINE_COLOR: [u8; 3] = [0xff, 0x00, 0xff];
/// Outline thickness in preview pixels
pub const SELECTION_OUTLINE_WIDTH: u32 = 2;

// Output settings
/// Default canvas output path
pub const DEFAULT_CANVAS_OUTPUT: &str = "mosaic.jpg";
/// Default descriptor output path
pub const DEFAULT_DESCRIPTOR_OUTPUT: &str = "mosaic.til";
/// Default preview frame path
pub const DEFAULT_PREVIEW_OUTPUT: &str = "mosaic_preview.png";

/// Per-run parameters for grid construction and rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Nominal cell count along the larger target side; also drives the cooldown
    pub tile_count: u32,
    /// Pixel size of one rendered cell
    pub cell_pixels: u32,
    /// Initial distance weights
    pub weights: [u32; 3],
    /// Where the final canvas is written
    pub canvas_output: PathBuf,
    /// Where the final descriptor is written
    pub descriptor_output: PathBuf,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            cell_pixels: DEFAULT_CELL_PIXELS,
            weights: DEFAULT_DISTANCE_WEIGHTS,
            canvas_output: PathBuf::from(DEFAULT_CANVAS_OUTPUT),
            descriptor_output: PathBuf::from(DEFAULT_DESCRIPTOR_OUTPUT),
        }
    }
}

impl MosaicConfig {
    /// Cooldown applied to a freshly selected entry
    pub const fn cooldown(&self) -> u32 {
        cooldown_for(self.tile_count)
    }
}

/// Number of matcher passes an entry sits out after being selected
///
/// Assumes raster order approximates spatial adjacency: 1.5 rows of cells.
pub const fn cooldown_for(tile_count: u32) -> u32 {
    tile_count.saturating_mul(COOLDOWN_NUMERATOR) / COOLDOWN_DENOMINATOR
}
