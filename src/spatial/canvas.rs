//! Full-resolution tile canvas

use crate::index::ColorIndex;
use crate::io::image::blit;
use crate::io::progress::ProgressReporter;
use crate::spatial::grid::{Cell, MosaicGrid};
use image::RgbImage;

/// Rendered mosaic: one cached corpus rendering blitted per cell
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    cell_pixels: u32,
}

impl Canvas {
    /// Black canvas sized for a grid
    pub fn blank(grid: &MosaicGrid) -> Self {
        let (width, height) = grid.canvas_size();
        Self {
            image: RgbImage::new(width, height),
            cell_pixels: grid.cell_pixels(),
        }
    }

    /// Render every cell of a grid
    pub fn render(grid: &MosaicGrid, index: &ColorIndex, progress: &ProgressReporter) -> Self {
        let mut canvas = Self::blank(grid);
        let phase = progress.phase(grid.rows() as u64, "Rendering");

        for row in 0..grid.rows() {
            canvas.render_cells(grid, index, (0..grid.cols()).map(|col| Cell::new(row, col)));
            phase.advance();
        }
        phase.finish();

        log::info!(
            "Rendered {}x{} canvas",
            canvas.image.width(),
            canvas.image.height()
        );
        canvas
    }

    /// Re-render only the given cells; returns how many were drawn
    ///
    /// Cells outside the grid are ignored.
    pub fn render_cells<I>(&mut self, grid: &MosaicGrid, index: &ColorIndex, cells: I) -> usize
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut drawn = 0;
        for cell in cells {
            let Some(tile) = grid
                .assignment(cell)
                .and_then(|id| index.rendering(id, self.cell_pixels))
            else {
                continue;
            };
            blit(
                &mut self.image,
                tile,
                cell.col as u32 * self.cell_pixels,
                cell.row as u32 * self.cell_pixels,
            );
            drawn += 1;
        }
        drawn
    }

    /// Rendered pixels
    pub const fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Pixel size of one cell
    pub const fn cell_pixels(&self) -> u32 {
        self.cell_pixels
    }
}
