//! Tests for preview geometry and frame composition

#[cfg(test)]
mod tests {
    use crate::{gray_index, striped_grid};
    use photomosaic::io::progress::ProgressReporter;
    use photomosaic::session::preview::{PreviewGeometry, compose_preview};
    use photomosaic::session::selection::Selection;
    use photomosaic::spatial::{Canvas, Cell};

    // Tests the preview scale targets an 800 pixel high frame
    // Verified by dividing by the canvas width
    #[test]
    fn test_scale_for_grid() {
        assert_eq!(PreviewGeometry::for_grid(&striped_grid(10, 4, 1, 200)).scale(), 2);
        assert_eq!(PreviewGeometry::for_grid(&striped_grid(2, 3, 1, 16)).scale(), 1);
        assert_eq!(PreviewGeometry::with_scale(&striped_grid(2, 3, 1, 16), 0).scale(), 1);
    }

    // Tests preview pixels map to cells through the scale
    // Verified by ignoring the scale
    #[test]
    fn test_cell_at() {
        let geometry = PreviewGeometry::with_scale(&striped_grid(2, 3, 1, 16), 4);

        assert_eq!(geometry.cell_at(0, 0), Cell::new(0, 0));
        assert_eq!(geometry.cell_at(3, 5), Cell::new(1, 0));
        assert_eq!(geometry.cell_at(8, 3), Cell::new(0, 2));
    }

    // Tests pointer positions past the grid clamp to the edge cells
    // Verified by returning out-of-grid cells
    #[test]
    fn test_cell_at_clamps() {
        let geometry = PreviewGeometry::with_scale(&striped_grid(2, 3, 1, 16), 4);

        assert_eq!(geometry.cell_at(1000, 1000), Cell::new(1, 2));
        assert_eq!(geometry.cell_at(0, 1000), Cell::new(1, 0));
    }

    // Tests cell origins and extents are the canvas layout divided by the scale
    // Verified by multiplying by the scale
    #[test]
    fn test_cell_origin() {
        let geometry = PreviewGeometry::with_scale(&striped_grid(2, 3, 1, 16), 4);

        assert_eq!(geometry.cell_origin(Cell::new(1, 2)), (8, 4));
        assert_eq!(geometry.cell_extent(), 4);
    }

    // Tests frames are the downscaled canvas with selected cells outlined
    // Verified by outlining unselected cells
    #[test]
    fn test_compose_preview() {
        let index = gray_index(&[50]);
        let grid = striped_grid(2, 2, 1, 4);
        let canvas = Canvas::render(&grid, &index, &ProgressReporter::disabled());
        let geometry = PreviewGeometry::with_scale(&grid, 2);
        let mut selection = Selection::new();
        selection.insert(Cell::new(0, 0));

        let frame = compose_preview(&canvas, &geometry, &selection);

        assert_eq!(frame.dimensions(), (4, 4));
        assert_eq!(frame.get_pixel(0, 0).0, [0xff, 0x00, 0xff]);
        assert_eq!(frame.get_pixel(1, 1).0, [0xff, 0x00, 0xff]);
        assert_eq!(frame.get_pixel(2, 2).0, [50, 50, 50]);
        assert_eq!(frame.get_pixel(3, 0).0, [50, 50, 50]);
    }
}
