//! Mosaic grid: per-cell assignments plus the reduced target coloring
//!
//! The grid is built once by downsampling the target to roughly `tile_count`
//! cells along its larger side and matching every cell in raster order.
//! Raster order is load-bearing: the matcher's cooldowns evolve across calls,
//! so evaluating cells in any other order (or in parallel) changes which
//! corpus images get spread where.

use crate::algorithm::matcher::Matcher;
use crate::index::{ColorIndex, EntryId, Signature};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{box_average, to_luma_chroma};
use crate::io::progress::ProgressReporter;
use image::RgbImage;
use ndarray::Array2;

/// Grid position (row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row index, top to bottom
    pub row: usize,
    /// Column index, left to right
    pub col: usize,
}

impl Cell {
    /// Cell at `(row, col)`
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    const fn index(self) -> [usize; 2] {
        [self.row, self.col]
    }
}

/// Current cell assignments and the luma/chroma signature each cell was matched against
#[derive(Debug, Clone)]
pub struct MosaicGrid {
    assignments: Array2<EntryId>,
    source: Array2<Signature>,
    cell_pixels: u32,
    canvas_size: (u32, u32),
}

/// Canvas size in pixels (width, height) for a grid shape
///
/// # Errors
///
/// Returns an error if either side does not fit in `u32` pixels
pub fn canvas_dimensions(rows: usize, cols: usize, cell_pixels: u32) -> Result<(u32, u32)> {
    let side = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(cell_pixels))
    };
    match (side(cols), side(rows)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(invalid_parameter(
            "cell_pixels",
            &cell_pixels,
            &format!("a {cols}x{rows} canvas overflows the pixel range"),
        )),
    }
}

/// Downsampling factor that leaves about `tile_count` cells along the larger side
pub fn downsample_factor(width: u32, height: u32, tile_count: u32) -> u32 {
    (width.max(height) / tile_count.max(1)).max(1)
}

impl MosaicGrid {
    /// Match every cell of a downsampled target against the index
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `cell_pixels` is zero
    /// - The downsampled target has no cells
    /// - The rendered canvas would overflow `u32` pixels
    /// - The index is empty
    pub fn build(
        target: &RgbImage,
        index: &mut ColorIndex,
        matcher: &Matcher,
        tile_count: u32,
        cell_pixels: u32,
        progress: &ProgressReporter,
    ) -> Result<Self> {
        if cell_pixels == 0 {
            return Err(invalid_parameter(
                "cell_pixels",
                &cell_pixels,
                &"cells need at least one pixel",
            ));
        }

        let factor = downsample_factor(target.width(), target.height(), tile_count);
        let reduced = to_luma_chroma(&box_average(target, factor));
        let (rows, cols) = (reduced.height() as usize, reduced.width() as usize);
        if rows == 0 || cols == 0 {
            return Err(MosaicError::InvalidSourceData {
                reason: format!(
                    "{}x{} target reduces to an empty grid at factor {factor}",
                    target.width(),
                    target.height()
                ),
            });
        }
        canvas_dimensions(rows, cols, cell_pixels)?;

        let source = Array2::from_shape_fn((rows, cols), |(row, col)| {
            reduced
                .get_pixel_checked(col as u32, row as u32)
                .map_or_else(Signature::default, |pixel| Signature(pixel.0))
        });

        log::info!("Matching {cols}x{rows} cells (downsample factor {factor})");
        let phase = progress.phase(rows as u64, "Matching");
        let mut assignments = Vec::with_capacity(rows * cols);

        for (row, signatures) in source.rows().into_iter().enumerate() {
            for &signature in signatures {
                let winner =
                    matcher
                        .find_best(index, signature)
                        .ok_or_else(|| MosaicError::EmptyIndex {
                            corpus: index.base_dir().to_path_buf(),
                        })?;
                assignments.push(winner);
            }
            log::debug!("Matched row {}/{rows}", row + 1);
            phase.advance();
        }
        phase.finish();

        let assignments = Array2::from_shape_vec((rows, cols), assignments).map_err(|e| {
            MosaicError::InvalidSourceData {
                reason: e.to_string(),
            }
        })?;

        Self::from_parts(assignments, source, cell_pixels)
    }

    /// Assemble a grid from precomputed assignments and source signatures
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The two arrays differ in shape
    /// - `cell_pixels` is zero
    /// - The rendered canvas would overflow `u32` pixels
    pub fn from_parts(
        assignments: Array2<EntryId>,
        source: Array2<Signature>,
        cell_pixels: u32,
    ) -> Result<Self> {
        if assignments.dim() != source.dim() {
            return Err(MosaicError::InvalidSourceData {
                reason: format!(
                    "assignment shape {:?} differs from source shape {:?}",
                    assignments.dim(),
                    source.dim()
                ),
            });
        }
        if cell_pixels == 0 {
            return Err(invalid_parameter(
                "cell_pixels",
                &cell_pixels,
                &"cells need at least one pixel",
            ));
        }
        let canvas_size =
            canvas_dimensions(assignments.nrows(), assignments.ncols(), cell_pixels)?;

        Ok(Self {
            assignments,
            source,
            cell_pixels,
            canvas_size,
        })
    }

    /// Number of cell rows
    pub fn rows(&self) -> usize {
        self.assignments.nrows()
    }

    /// Number of cell columns
    pub fn cols(&self) -> usize {
        self.assignments.ncols()
    }

    /// Pixel size of one rendered cell
    pub const fn cell_pixels(&self) -> u32 {
        self.cell_pixels
    }

    /// Rendered canvas size in pixels (width, height)
    pub const fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    /// Whether a cell lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.col < self.cols()
    }

    /// All cells in raster order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// Entry currently shown at a cell
    pub fn assignment(&self, cell: Cell) -> Option<EntryId> {
        self.assignments.get(cell.index()).copied()
    }

    /// Show `id` at a cell; returns whether the cell exists
    pub fn set_assignment(&mut self, cell: Cell, id: EntryId) -> bool {
        if let Some(slot) = self.assignments.get_mut(cell.index()) {
            *slot = id;
            true
        } else {
            false
        }
    }

    /// Luma/chroma signature of the reduced target at a cell
    pub fn source_signature(&self, cell: Cell) -> Option<Signature> {
        self.source.get(cell.index()).copied()
    }

    /// Assignment snapshot, row-major
    pub const fn assignments(&self) -> &Array2<EntryId> {
        &self.assignments
    }
}
