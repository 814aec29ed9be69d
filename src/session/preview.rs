//! Display-size frames: downscaled canvas with selection outlines

use crate::io::configuration::{
    PREVIEW_TARGET_HEIGHT, SELECTION_OUTLINE_COLOR, SELECTION_OUTLINE_WIDTH,
};
use crate::io::image::box_average;
use crate::session::selection::Selection;
use crate::spatial::canvas::Canvas;
use crate::spatial::grid::{Cell, MosaicGrid};
use image::{Rgb, RgbImage};

/// Mapping between preview pixels and grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewGeometry {
    scale: u32,
    cell_pixels: u32,
    rows: usize,
    cols: usize,
}

impl PreviewGeometry {
    /// Geometry shrinking the canvas by an integer factor to about 800 pixels high
    pub fn for_grid(grid: &MosaicGrid) -> Self {
        let (_, canvas_height) = grid.canvas_size();
        Self::with_scale(grid, canvas_height / PREVIEW_TARGET_HEIGHT)
    }

    /// Geometry with an explicit downscale factor (zero is treated as one)
    pub fn with_scale(grid: &MosaicGrid, scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            cell_pixels: grid.cell_pixels(),
            rows: grid.rows(),
            cols: grid.cols(),
        }
    }

    /// Canvas pixels per preview pixel
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Cell under a preview pixel, clamped into the grid
    pub fn cell_at(&self, x: u32, y: u32) -> Cell {
        let to_cell = |coordinate: u32, limit: usize| {
            let index = (u64::from(coordinate) * u64::from(self.scale)) / u64::from(self.cell_pixels);
            (index as usize).min(limit.saturating_sub(1))
        };
        Cell::new(to_cell(y, self.rows), to_cell(x, self.cols))
    }

    /// Top-left preview pixel of a cell
    pub const fn cell_origin(&self, cell: Cell) -> (u32, u32) {
        (
            (cell.col as u32 * self.cell_pixels) / self.scale,
            (cell.row as u32 * self.cell_pixels) / self.scale,
        )
    }

    /// Side length of a cell in preview pixels
    pub const fn cell_extent(&self) -> u32 {
        self.cell_pixels / self.scale
    }
}

/// Outline the `extent` square at `(x0, y0)`, clipped to the frame
fn draw_outline(frame: &mut RgbImage, x0: u32, y0: u32, extent: u32) {
    let color = Rgb(SELECTION_OUTLINE_COLOR);
    let thickness = SELECTION_OUTLINE_WIDTH.min(extent);

    for dy in 0..extent {
        for dx in 0..extent {
            let on_border = dx < thickness
                || dy < thickness
                || dx >= extent - thickness
                || dy >= extent - thickness;
            if !on_border {
                continue;
            }
            let (x, y) = (x0 + dx, y0 + dy);
            if x < frame.width() && y < frame.height() {
                frame.put_pixel(x, y, color);
            }
        }
    }
}

/// Compose the frame shown to the operator
pub fn compose_preview(
    canvas: &Canvas,
    geometry: &PreviewGeometry,
    selection: &Selection,
) -> RgbImage {
    let mut frame = box_average(canvas.image(), geometry.scale());
    let extent = geometry.cell_extent();

    for cell in selection.iter() {
        let (x, y) = geometry.cell_origin(cell);
        draw_outline(&mut frame, x, y, extent);
    }
    frame
}
