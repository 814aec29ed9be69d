//! Per-cell history of alternate assignments for manual override
//!
//! Each cell owns an append-only list of entries it has shown, ordered from
//! the most recently discovered alternate (head) to the original match
//! (tail), plus a cursor on the entry currently displayed. Stepping back walks
//! toward the head and only asks for a new alternate once the head is
//! reached; stepping forward walks back toward the original match.

use crate::index::EntryId;
use crate::spatial::grid::{Cell, MosaicGrid};
use ndarray::Array2;
use std::collections::{HashSet, VecDeque};

/// What a navigation step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Cursor moved onto an existing node
    Revisited,
    /// A new alternate was found and prepended
    Discovered,
    /// No alternate remains outside the cell's history; nothing changed
    Exhausted,
    /// Already at the tail; nothing changed
    AtEnd,
}

/// Result of a navigation step at one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// What happened
    pub outcome: StepOutcome,
    /// Entry under the cursor after the step
    pub current: EntryId,
}

impl Step {
    /// Whether the displayed entry may have changed
    pub const fn moved(&self) -> bool {
        matches!(
            self.outcome,
            StepOutcome::Revisited | StepOutcome::Discovered
        )
    }
}

#[derive(Debug, Clone)]
struct CellHistory {
    nodes: VecDeque<EntryId>,
    cursor: usize,
}

impl CellHistory {
    fn new(initial: EntryId) -> Self {
        Self {
            nodes: VecDeque::from([initial]),
            cursor: 0,
        }
    }

    fn current(&self) -> Option<EntryId> {
        self.nodes.get(self.cursor).copied()
    }
}

/// Navigable alternate history for every cell of a grid
#[derive(Debug, Clone)]
pub struct HistoryStore {
    cells: Array2<CellHistory>,
}

impl HistoryStore {
    /// Seed each cell's history with its current assignment
    pub fn new(grid: &MosaicGrid) -> Self {
        Self {
            cells: grid.assignments().map(|&id| CellHistory::new(id)),
        }
    }

    fn cell(&self, cell: Cell) -> Option<&CellHistory> {
        self.cells.get([cell.row, cell.col])
    }

    /// Entry under a cell's cursor
    pub fn current(&self, cell: Cell) -> Option<EntryId> {
        self.cell(cell).and_then(CellHistory::current)
    }

    /// Cursor position within a cell's list (0 = head)
    pub fn cursor(&self, cell: Cell) -> Option<usize> {
        self.cell(cell).map(|history| history.cursor)
    }

    /// Number of nodes recorded for a cell (0 outside the grid)
    pub fn len(&self, cell: Cell) -> usize {
        self.cell(cell).map_or(0, |history| history.nodes.len())
    }

    /// Recorded entries from head to tail
    pub fn entries(&self, cell: Cell) -> Vec<EntryId> {
        self.cell(cell)
            .map(|history| history.nodes.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every entry a cell has shown, as an exclusion set
    pub fn exclusion_set(&self, cell: Cell) -> HashSet<EntryId> {
        self.cell(cell)
            .map(|history| history.nodes.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Show a different match at a cell
    ///
    /// Moves toward the head if a predecessor exists. At the head, `discover`
    /// is called with the cell's full history; a returned entry becomes the
    /// new head and the cursor moves onto it. `None` leaves the cell as is.
    /// Returns `None` for cells outside the grid.
    pub fn step_back<F>(&mut self, cell: Cell, discover: F) -> Option<Step>
    where
        F: FnOnce(&HashSet<EntryId>) -> Option<EntryId>,
    {
        let history = self.cells.get_mut([cell.row, cell.col])?;

        let outcome = if history.cursor > 0 {
            history.cursor -= 1;
            StepOutcome::Revisited
        } else {
            let excluded: HashSet<EntryId> = history.nodes.iter().copied().collect();
            match discover(&excluded) {
                Some(alternate) => {
                    history.nodes.push_front(alternate);
                    history.cursor = 0;
                    StepOutcome::Discovered
                }
                None => StepOutcome::Exhausted,
            }
        };

        history.current().map(|current| Step { outcome, current })
    }

    /// Move a cell back toward its original match; no-op at the tail
    pub fn step_forward(&mut self, cell: Cell) -> Option<Step> {
        let history = self.cells.get_mut([cell.row, cell.col])?;

        let outcome = if history.cursor + 1 < history.nodes.len() {
            history.cursor += 1;
            StepOutcome::Revisited
        } else {
            StepOutcome::AtEnd
        };

        history.current().map(|current| Step { outcome, current })
    }
}
