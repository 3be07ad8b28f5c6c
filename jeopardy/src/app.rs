//! Main application state and logic

use jeopardy_core::{
    AbortReason, BoardController, CategorySource, ClickOutcome, GameConfig, MemorySurface,
    RevealState, StartOutcome,
};
use ratatui::layout::Rect;

use crate::ui::layout::BoardLayout;
use crate::ui::theme::BoardTheme;

/// Category source chosen at startup.
pub type DynSource = Box<dyn CategorySource>;

/// Main application state
pub struct App {
    // Game session
    pub controller: BoardController<DynSource>,
    pub surface: MemorySurface,

    // UI state
    pub theme: BoardTheme,
    pub selected: (usize, usize),
    pub viewport: Rect,
    pub show_help: bool,

    // Status
    status_message: Option<String>,
    pub pending_start: bool,
}

impl App {
    /// Create an application that starts a game on its first tick.
    pub fn new(source: DynSource, config: GameConfig) -> Self {
        Self {
            controller: BoardController::new(source, config),
            surface: MemorySurface::with_label("Start"),
            theme: BoardTheme::default(),
            selected: (0, 0),
            viewport: Rect::default(),
            show_help: false,
            status_message: None,
            pending_start: true,
        }
    }

    /// Queue a (re)start for the next loop iteration.
    pub fn request_start(&mut self) {
        if !self.surface.is_loading() {
            self.pending_start = true;
        }
    }

    /// True from the moment a start is queued until its fetches finish.
    pub fn is_loading(&self) -> bool {
        self.pending_start || self.surface.is_loading()
    }

    /// Label for the start control, reading as loading while a start is queued.
    pub fn start_label(&self) -> &str {
        if self.pending_start {
            self.controller.config().loading_label.as_str()
        } else {
            self.surface.loading().label.as_str()
        }
    }

    /// Run the start sequence and report how it went.
    pub async fn start_game(&mut self) {
        self.pending_start = false;
        let outcome = self.controller.start_game(&mut self.surface).await;

        match outcome {
            StartOutcome::Started { categories, unavailable: 0 } => {
                self.selected = (0, 0);
                self.set_status(format!("{categories} categories loaded. Pick a clue!"));
            }
            StartOutcome::Started {
                categories,
                unavailable,
            } => {
                self.selected = (0, 0);
                self.set_status(format!(
                    "{categories} categories loaded, {unavailable} unavailable."
                ));
            }
            StartOutcome::Aborted(AbortReason::NoCategories) => {
                self.set_status("No categories available. Press r to try again.");
            }
            StartOutcome::Aborted(AbortReason::IdsUnavailable(_)) => {
                let notice = self
                    .surface
                    .last_notice()
                    .unwrap_or("Could not start a new game.")
                    .to_string();
                self.set_status(format!("{notice} Press r to try again."));
            }
        }
    }

    /// Layout for the current viewport and board size.
    pub fn layout(&self) -> BoardLayout {
        let (rows, cols) = self.grid_size();
        BoardLayout::calculate(self.viewport, cols, rows)
    }

    /// Rendered grid size as `(rows, cols)`.
    pub fn grid_size(&self) -> (usize, usize) {
        self.surface
            .table()
            .map(|t| (t.rows.len(), t.width()))
            .unwrap_or((0, 0))
    }

    /// Id of the selected cell, if a board is showing.
    pub fn selected_cell_id(&self) -> Option<&str> {
        let (row, col) = self.selected;
        self.surface
            .table()
            .and_then(|t| t.cell_at(row, col))
            .map(|c| c.id.as_str())
    }

    /// Move the selection, clamped to the grid.
    pub fn move_selection(&mut self, d_row: isize, d_col: isize) {
        let (rows, cols) = self.grid_size();
        if rows == 0 || cols == 0 {
            return;
        }

        let (row, col) = self.selected;
        self.selected = (
            row.saturating_add_signed(d_row).min(rows - 1),
            col.saturating_add_signed(d_col).min(cols - 1),
        );
    }

    /// Click the selected cell.
    pub fn click_selected(&mut self) {
        if let Some(id) = self.selected_cell_id().map(str::to_string) {
            self.click(&id);
        }
    }

    /// Click whatever cell is drawn at a screen position.
    pub fn click_at(&mut self, x: u16, y: u16) {
        if let Some((row, col)) = self.layout().hit_test(x, y) {
            self.selected = (row, col);
            self.click_selected();
        }
    }

    fn click(&mut self, cell_id: &str) {
        match self.controller.on_cell_click(cell_id, &mut self.surface) {
            ClickOutcome::Revealed {
                state: RevealState::Answer,
                ..
            } => self.clear_status(),
            ClickOutcome::Revealed { .. } => {
                self.set_status("Click again to see the answer.");
            }
            ClickOutcome::Unchanged(_) => {}
            ClickOutcome::NotFound(_) => {
                self.set_status("That clue is not available.");
            }
        }
    }

    /// Reveal state behind a rendered cell, if it resolves.
    pub fn cell_state(&self, cell_id: &str) -> Option<RevealState> {
        self.controller
            .store()
            .find_cell(cell_id)
            .ok()
            .map(|(_, clue)| clue.state())
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
