//! Interactive editing session
//!
//! An explicit state machine over [`InputEvent`]s. Pointer drags grow or
//! shrink the selection; key commands navigate per-cell histories, copy the
//! anchor's entry across the selection, or retune the distance weights.
//! [`EditSession::handle`] is display independent; [`EditSession::run`]
//! drives it from a [`Screen`] until the operator ends the session.

use crate::algorithm::history::{HistoryStore, Step, StepOutcome};
use crate::algorithm::matcher::{DistanceWeights, Matcher};
use crate::index::ColorIndex;
use crate::io::error::Result;
use crate::session::display::Screen;
use crate::session::events::{InputEvent, Key, PointerAction, PointerButton};
use crate::session::preview::{PreviewGeometry, compose_preview};
use crate::session::selection::Selection;
use crate::session::weight_buffer::WeightBuffer;
use crate::spatial::canvas::Canvas;
use crate::spatial::grid::{Cell, MosaicGrid};
use image::RgbImage;

/// Whether a drag adds or removes cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Cells under the drag rectangle are added
    Select,
    /// Cells under the drag rectangle are removed
    Deselect,
}

/// Pointer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No button held
    Idle,
    /// Button held since `anchor` was pressed
    Dragging {
        /// Cell under the pointer at press time
        anchor: Cell,
        /// Select or deselect
        mode: DragMode,
    },
}

/// Effect of one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Something visible changed; a new frame should be shown
    Redraw,
    /// Nothing visible changed
    Unchanged,
    /// Character appended to the pending weight input
    Buffered,
    /// Weights replaced for future matches
    WeightsApplied(DistanceWeights),
    /// Pending input was not three positive integers; weights kept
    WeightsRejected,
    /// Key not bound to any command
    Unrecognized,
    /// Operator ended the session
    Ended,
}

/// Counters reported when a session finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Events consumed
    pub events: usize,
    /// Frames shown, including the initial one
    pub frames: usize,
    /// Whether the session ended on an explicit command rather than end of input
    pub ended_by_command: bool,
}

/// Mosaic editing state: grid, histories, selection and pending input
pub struct EditSession {
    index: ColorIndex,
    grid: MosaicGrid,
    history: HistoryStore,
    matcher: Matcher,
    canvas: Canvas,
    geometry: PreviewGeometry,
    selection: Selection,
    state: SessionState,
    pending: WeightBuffer,
}

impl EditSession {
    /// Start a session over a built grid and its rendered canvas
    pub fn new(index: ColorIndex, grid: MosaicGrid, matcher: Matcher, canvas: Canvas) -> Self {
        let geometry = PreviewGeometry::for_grid(&grid);
        Self::with_geometry(index, grid, matcher, canvas, geometry)
    }

    /// Start a session with an explicit preview geometry
    pub fn with_geometry(
        index: ColorIndex,
        grid: MosaicGrid,
        matcher: Matcher,
        canvas: Canvas,
        geometry: PreviewGeometry,
    ) -> Self {
        let history = HistoryStore::new(&grid);
        Self {
            index,
            grid,
            history,
            matcher,
            canvas,
            geometry,
            selection: Selection::new(),
            state: SessionState::Idle,
            pending: WeightBuffer::default(),
        }
    }

    /// Current pointer state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Current selection
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current assignments
    pub const fn grid(&self) -> &MosaicGrid {
        &self.grid
    }

    /// Per-cell histories
    pub const fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Matcher with the current weights
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Corpus index
    pub const fn index(&self) -> &ColorIndex {
        &self.index
    }

    /// Rendered canvas
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Pixel to cell mapping of the preview
    pub const fn geometry(&self) -> &PreviewGeometry {
        &self.geometry
    }

    /// Text typed since the last apply-weights command
    pub fn pending_input(&self) -> String {
        self.pending.text()
    }

    /// Frame for the current canvas and selection
    pub fn frame(&self) -> RgbImage {
        compose_preview(&self.canvas, &self.geometry, &self.selection)
    }

    /// Give up the session, keeping the index, grid and canvas
    pub fn into_parts(self) -> (ColorIndex, MosaicGrid, Canvas) {
        (self.index, self.grid, self.canvas)
    }

    /// Apply one input event
    pub fn handle(&mut self, event: InputEvent) -> Response {
        match event {
            InputEvent::Pointer { action, x, y } => {
                let cell = self.geometry.cell_at(x, y);
                self.handle_pointer(action, cell)
            }
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    fn handle_pointer(&mut self, action: PointerAction, cell: Cell) -> Response {
        match (action, self.state) {
            (PointerAction::Press(button), SessionState::Idle) => {
                let mode = match button {
                    PointerButton::Primary => DragMode::Select,
                    PointerButton::Secondary => DragMode::Deselect,
                };
                self.state = SessionState::Dragging { anchor: cell, mode };
                self.drag_to(cell, mode, cell)
            }
            (PointerAction::Move, SessionState::Dragging { anchor, mode }) => {
                self.drag_to(anchor, mode, cell)
            }
            (PointerAction::Release, _) => {
                self.state = SessionState::Idle;
                Response::Unchanged
            }
            (PointerAction::Press(_) | PointerAction::Move, _) => Response::Unchanged,
        }
    }

    fn drag_to(&mut self, anchor: Cell, mode: DragMode, cell: Cell) -> Response {
        let changed = match mode {
            DragMode::Select => self.selection.fill_rect(anchor, cell),
            DragMode::Deselect => self.selection.clear_rect(anchor, cell),
        };
        if changed {
            Response::Redraw
        } else {
            Response::Unchanged
        }
    }

    fn handle_key(&mut self, key: Key) -> Response {
        match key {
            Key::StepBack => {
                self.navigate(true);
                Response::Redraw
            }
            Key::StepForward => {
                self.navigate(false);
                Response::Redraw
            }
            Key::Replace => self.replace_with_anchor(),
            Key::ApplyWeights => self.apply_weights(),
            Key::EndSession => Response::Ended,
            Key::Char(c) if c.is_ascii_digit() || c == ' ' => {
                self.pending.push(c);
                Response::Buffered
            }
            other => {
                log::warn!("Unrecognized command: {other:?}");
                Response::Unrecognized
            }
        }
    }

    /// Step every selected cell back (toward new alternates) or forward
    fn navigate(&mut self, backward: bool) {
        let cells: Vec<Cell> = self.selection.iter().collect();

        for &cell in &cells {
            let step = if backward {
                let target = self.grid.source_signature(cell).unwrap_or_default();
                let (matcher, index) = (&self.matcher, &self.index);
                self.history.step_back(cell, |excluded| {
                    matcher.find_best_excluding(index, target, excluded)
                })
            } else {
                self.history.step_forward(cell)
            };

            if let Some(Step { outcome, current }) = step {
                if outcome == StepOutcome::Exhausted {
                    log::info!(
                        "No alternates left for cell ({}, {})",
                        cell.row,
                        cell.col
                    );
                }
                self.grid.set_assignment(cell, current);
            }
        }

        self.canvas.render_cells(&self.grid, &self.index, cells);
    }

    /// Copy the anchor's entry to every selected cell, bypassing history
    fn replace_with_anchor(&mut self) -> Response {
        let Some(entry) = self
            .selection
            .anchor()
            .and_then(|anchor| self.grid.assignment(anchor))
        else {
            return Response::Unchanged;
        };

        let cells: Vec<Cell> = self.selection.iter().collect();
        for &cell in &cells {
            self.grid.set_assignment(cell, entry);
        }
        self.canvas.render_cells(&self.grid, &self.index, cells);
        Response::Redraw
    }

    fn apply_weights(&mut self) -> Response {
        let input = self.pending.take();
        match input.parse::<DistanceWeights>() {
            Ok(weights) => {
                self.matcher.set_weights(weights);
                log::info!("Distance weights set to {weights}");
                Response::WeightsApplied(weights)
            }
            Err(err) => {
                log::warn!("{err}; keeping {}", self.matcher.weights());
                Response::WeightsRejected
            }
        }
    }

    /// Run until the operator ends the session or input runs out
    ///
    /// # Errors
    ///
    /// Returns an error if the display fails to show a frame or deliver input
    pub fn run<S: Screen>(&mut self, display: &mut S) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        display.show(&self.frame())?;
        summary.frames += 1;

        while let Some(event) = display.next_event()? {
            summary.events += 1;
            match self.handle(event) {
                Response::Ended => {
                    summary.ended_by_command = true;
                    break;
                }
                Response::Redraw => {
                    display.show(&self.frame())?;
                    summary.frames += 1;
                }
                _ => {}
            }
        }

        if !summary.ended_by_command {
            log::info!("Input exhausted, ending session");
        }
        Ok(summary)
    }
}
