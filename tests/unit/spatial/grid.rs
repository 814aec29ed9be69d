//! Tests for grid construction and cell assignment

#[cfg(test)]
mod tests {
    use crate::{gray_index, striped_grid};
    use image::{Rgb, RgbImage};
    use ndarray::Array2;
    use photomosaic::MosaicError;
    use photomosaic::algorithm::matcher::{DistanceWeights, Matcher};
    use photomosaic::index::{EntryId, Signature};
    use photomosaic::io::progress::ProgressReporter;
    use photomosaic::spatial::grid::{canvas_dimensions, downsample_factor};
    use photomosaic::spatial::{Cell, MosaicGrid};

    fn unit_matcher(cooldown: u32) -> Matcher {
        Matcher::new(
            DistanceWeights::new([1, 1, 1]).expect("unit weights are valid"),
            cooldown,
        )
    }

    // Tests the factor leaves about tile_count cells along the larger side
    // Verified by dividing the smaller side
    #[test]
    fn test_downsample_factor() {
        assert_eq!(downsample_factor(5600, 3000, 56), 100);
        assert_eq!(downsample_factor(3000, 5600, 56), 100);
        assert_eq!(downsample_factor(10, 10, 56), 1);
        assert_eq!(downsample_factor(100, 10, 0), 100);
    }

    // Tests grid shape follows the downsampled target and cells match their block
    // Verified by matching against the unreduced pixels
    #[test]
    fn test_build_matches_blocks() {
        let target = RgbImage::from_fn(8, 4, |x, _| {
            if x < 4 { Rgb([0, 0, 0]) } else { Rgb([200, 200, 200]) }
        });
        let mut index = gray_index(&[0, 200]);

        let grid = MosaicGrid::build(
            &target,
            &mut index,
            &unit_matcher(0),
            4,
            8,
            &ProgressReporter::disabled(),
        )
        .expect("grid builds");

        assert_eq!((grid.rows(), grid.cols()), (2, 4));
        assert_eq!(grid.canvas_size(), (32, 16));
        assert_eq!(grid.assignment(Cell::new(1, 0)), Some(EntryId::new(0)));
        assert_eq!(grid.assignment(Cell::new(1, 3)), Some(EntryId::new(1)));
        assert_eq!(
            grid.source_signature(Cell::new(0, 3)),
            Some(Signature::new(200, 128, 128))
        );
    }

    // Tests raster order threads cooldowns from cell to cell
    // Verified by resetting cooldowns per cell
    #[test]
    fn test_build_spreads_repeats() {
        let target = RgbImage::from_pixel(3, 1, Rgb([100, 100, 100]));
        let mut index = gray_index(&[0, 100, 200]);

        let grid = MosaicGrid::build(
            &target,
            &mut index,
            &unit_matcher(3),
            3,
            2,
            &ProgressReporter::disabled(),
        )
        .expect("grid builds");

        let row: Vec<EntryId> = grid.cells().filter_map(|cell| grid.assignment(cell)).collect();
        // Entry 1 cools for the rest of the row, entry 2 once it has been used
        assert_eq!(row, vec![EntryId::new(1), EntryId::new(2), EntryId::new(0)]);
    }

    // Tests degenerate inputs are rejected
    // Verified by building an empty grid
    #[test]
    fn test_build_rejects_degenerate_input() {
        let mut index = gray_index(&[0]);
        let progress = ProgressReporter::disabled();
        let matcher = unit_matcher(0);

        let empty = MosaicGrid::build(&RgbImage::new(0, 0), &mut index, &matcher, 4, 8, &progress);
        assert!(matches!(empty, Err(MosaicError::InvalidSourceData { .. })));

        let target = RgbImage::new(4, 4);
        let zero_cells = MosaicGrid::build(&target, &mut index, &matcher, 4, 0, &progress);
        assert!(matches!(zero_cells, Err(MosaicError::InvalidParameter { .. })));

        let mut empty_index = photomosaic::index::ColorIndex::from_entries("/corpus", Vec::new());
        let no_entries = MosaicGrid::build(&target, &mut empty_index, &matcher, 4, 8, &progress);
        assert!(matches!(no_entries, Err(MosaicError::EmptyIndex { .. })));
    }

    // Tests parts of different shape cannot form a grid
    // Verified by trusting the assignment shape
    #[test]
    fn test_from_parts_shape_mismatch() {
        let assignments = Array2::from_elem((2, 2), EntryId::new(0));
        let source = Array2::from_elem((2, 3), Signature::default());

        assert!(MosaicGrid::from_parts(assignments, source, 4).is_err());
    }

    // Tests canvas sizes that overflow the pixel range are rejected
    // Verified by multiplying cells by cell pixels unchecked
    #[test]
    fn test_canvas_overflow_rejected() {
        assert_eq!(canvas_dimensions(37, 56, 128).ok(), Some((7168, 4736)));

        let oversized = canvas_dimensions(2, 3, u32::MAX / 2);
        assert!(matches!(oversized, Err(MosaicError::InvalidParameter { .. })));

        let assignments = Array2::from_elem((1, 2), EntryId::new(0));
        let source = Array2::from_elem((1, 2), Signature::default());
        let grid = MosaicGrid::from_parts(assignments, source, u32::MAX);
        assert!(matches!(grid, Err(MosaicError::InvalidParameter { .. })));

        let mut index = gray_index(&[0]);
        let built = MosaicGrid::build(
            &RgbImage::new(4, 4),
            &mut index,
            &unit_matcher(0),
            4,
            u32::MAX,
            &ProgressReporter::disabled(),
        );
        assert!(matches!(built, Err(MosaicError::InvalidParameter { .. })));
    }

    // Tests assignment updates stay inside the grid
    // Verified by accepting out-of-range writes
    #[test]
    fn test_set_assignment_bounds() {
        let mut grid = striped_grid(2, 2, 4, 4);

        assert!(grid.set_assignment(Cell::new(1, 0), EntryId::new(9)));
        assert!(!grid.set_assignment(Cell::new(2, 0), EntryId::new(9)));

        assert_eq!(grid.assignment(Cell::new(1, 0)), Some(EntryId::new(9)));
        assert!(grid.contains(Cell::new(1, 1)));
        assert!(!grid.contains(Cell::new(0, 2)));
        assert_eq!(grid.cells().count(), 4);
        assert_eq!(grid.assignments().dim(), (2, 2));
    }
}
