//! Tests for rectangle selection

#[cfg(test)]
mod tests {
    use photomosaic::session::selection::{Selection, rectangle};
    use photomosaic::spatial::Cell;

    // Tests rectangles are inclusive and independent of corner order
    // Verified by excluding the far corner
    #[test]
    fn test_rectangle_any_corner_order() {
        let forward: Vec<Cell> = rectangle(Cell::new(0, 0), Cell::new(1, 2)).collect();
        let backward: Vec<Cell> = rectangle(Cell::new(1, 2), Cell::new(0, 0)).collect();

        assert_eq!(forward.len(), 6);
        assert_eq!(forward, backward);
        assert_eq!(forward.first(), Some(&Cell::new(0, 0)));
        assert_eq!(forward.last(), Some(&Cell::new(1, 2)));
    }

    // Tests cells are selected at most once
    // Verified by appending duplicates to the order
    #[test]
    fn test_no_duplicates() {
        let mut selection = Selection::new();

        assert!(selection.fill_rect(Cell::new(0, 0), Cell::new(1, 1)));
        assert!(!selection.fill_rect(Cell::new(1, 1), Cell::new(0, 0)));
        assert!(selection.insert(Cell::new(2, 2)));
        assert!(!selection.insert(Cell::new(0, 1)));

        assert_eq!(selection.len(), 5);
    }

    // Tests the anchor is the most recently inserted cell
    // Verified by using the first inserted cell
    #[test]
    fn test_anchor_is_latest_insert() {
        let mut selection = Selection::new();
        assert_eq!(selection.anchor(), None);

        selection.insert(Cell::new(3, 3));
        selection.insert(Cell::new(0, 1));
        assert_eq!(selection.anchor(), Some(Cell::new(0, 1)));

        selection.remove(Cell::new(0, 1));
        assert_eq!(selection.anchor(), Some(Cell::new(3, 3)));
    }

    // Tests clearing a rectangle removes only its cells
    // Verified by clearing the whole selection
    #[test]
    fn test_clear_rect() {
        let mut selection = Selection::new();
        selection.fill_rect(Cell::new(0, 0), Cell::new(2, 2));

        assert!(selection.clear_rect(Cell::new(1, 1), Cell::new(2, 2)));
        assert!(!selection.clear_rect(Cell::new(2, 2), Cell::new(2, 2)));

        assert_eq!(selection.len(), 5);
        assert!(selection.contains(Cell::new(0, 2)));
        assert!(!selection.contains(Cell::new(1, 1)));
        assert_eq!(selection.iter().count(), selection.len());

        selection.clear_rect(Cell::new(0, 0), Cell::new(2, 2));
        assert!(selection.is_empty());
    }
}
