//! Multi-cell selection built from rectangle drags

use crate::spatial::grid::Cell;
use std::collections::HashSet;

/// Unique, insertion-ordered set of selected cells
///
/// The most recently inserted cell is the anchor used by replace commands.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    order: Vec<Cell>,
    members: HashSet<Cell>,
}

/// Cells of the inclusive rectangle spanned by two corners, row-major
pub fn rectangle(a: Cell, b: Cell) -> impl Iterator<Item = Cell> {
    let (min_row, max_row) = (a.row.min(b.row), a.row.max(b.row));
    let (min_col, max_col) = (a.col.min(b.col), a.col.max(b.col));
    (min_row..=max_row)
        .flat_map(move |row| (min_col..=max_col).map(move |col| Cell::new(row, col)))
}

impl Selection {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell; returns whether it was absent
    pub fn insert(&mut self, cell: Cell) -> bool {
        let added = self.members.insert(cell);
        if added {
            self.order.push(cell);
        }
        added
    }

    /// Remove a cell; returns whether it was present
    pub fn remove(&mut self, cell: Cell) -> bool {
        let removed = self.members.remove(&cell);
        if removed {
            self.order.retain(|&selected| selected != cell);
        }
        removed
    }

    /// Whether a cell is selected
    pub fn contains(&self, cell: Cell) -> bool {
        self.members.contains(&cell)
    }

    /// Number of selected cells
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected cells in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.order.iter().copied()
    }

    /// Most recently inserted selected cell
    pub fn anchor(&self) -> Option<Cell> {
        self.order.last().copied()
    }

    /// Select every cell of the rectangle `a`..=`b`; returns whether anything changed
    pub fn fill_rect(&mut self, a: Cell, b: Cell) -> bool {
        rectangle(a, b).fold(false, |changed, cell| self.insert(cell) | changed)
    }

    /// Deselect every cell of the rectangle `a`..=`b`; returns whether anything changed
    pub fn clear_rect(&mut self, a: Cell, b: Cell) -> bool {
        rectangle(a, b).fold(false, |changed, cell| self.remove(cell) | changed)
    }
}
