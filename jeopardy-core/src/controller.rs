//! Board Renderer/Controller.
//!
//! The controller owns the game session (source, store, config) and drives
//! a [`Surface`]: it starts games, renders the grid, and answers clicks.
//! Every failure is handled here; callers get an outcome value back, never
//! an error.

use crate::board::{Board, CellId, RevealState};
use crate::config::GameConfig;
use crate::error::LookupError;
use crate::source::CategorySource;
use crate::store::ClueStore;
use crate::surface::{LoadingView, Surface, Table, TableCell};
use tracing::{debug, error, info};

/// How a start attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new board was loaded and rendered.
    Started { categories: usize, unavailable: usize },
    /// Nothing was rendered; the previous board (if any) is still in place.
    Aborted(AbortReason),
}

impl StartOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, StartOutcome::Started { .. })
    }
}

/// Why a start attempt was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The id source answered with an empty set.
    NoCategories,
    /// The id source could not be reached.
    IdsUnavailable(String),
}

/// What a click on a cell did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The clue advanced and its cell now shows new text.
    Revealed { cell: CellId, state: RevealState },
    /// The clue was already showing its answer.
    Unchanged(CellId),
    /// The id did not resolve to a clue on the current board.
    NotFound(LookupError),
}

/// Drives one game session against a category source.
pub struct BoardController<S> {
    source: S,
    store: ClueStore,
    config: GameConfig,
}

impl<S: CategorySource> BoardController<S> {
    pub fn new(source: S, config: GameConfig) -> Self {
        Self {
            source,
            store: ClueStore::new(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &ClueStore {
        &self.store
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    /// Load a fresh board and render it.
    ///
    /// Shows the loading indicator, asks for category ids, fetches every
    /// category in one batch, renders, and hides the indicator. If the ids
    /// can't be fetched (or none come back) the attempt is abandoned with
    /// the indicator hidden and nothing rendered.
    pub async fn start_game<U>(&mut self, surface: &mut U) -> StartOutcome
    where
        U: Surface + ?Sized,
    {
        info!("Starting game setup");
        self.show_loading(surface);

        let ids = match self.source.category_ids(self.config.categories).await {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "Failed to fetch category ids");
                surface.notify(&format!("Could not start a new game: {e}"));
                self.hide_loading(surface);
                return StartOutcome::Aborted(AbortReason::IdsUnavailable(e.to_string()));
            }
        };

        if ids.is_empty() {
            error!("No category ids fetched");
            surface.notify("No categories available. Try again.");
            self.hide_loading(surface);
            return StartOutcome::Aborted(AbortReason::NoCategories);
        }

        let ids = &ids[..ids.len().min(self.config.categories)];
        self.store
            .load(&self.source, ids, self.config.clues_per_category)
            .await;

        self.render_grid(surface);
        self.hide_loading(surface);

        let board = self.store.board();
        StartOutcome::Started {
            categories: board.len(),
            unavailable: board.placeholder_count(),
        }
    }

    /// Rebuild the whole table from the current board.
    pub fn render_grid<U>(&self, surface: &mut U)
    where
        U: Surface + ?Sized,
    {
        let table = build_table(self.store.board(), &self.config);
        debug!(
            columns = table.width(),
            rows = table.rows.len(),
            "Rendering grid"
        );
        surface.replace_table(table);
    }

    /// Advance the clue behind `cell_id` and show its new text.
    ///
    /// Unknown or malformed ids are logged and otherwise ignored.
    pub fn on_cell_click<U>(&mut self, cell_id: &str, surface: &mut U) -> ClickOutcome
    where
        U: Surface + ?Sized,
    {
        debug!(cell = cell_id, "Clue clicked");

        let reveal = cell_id
            .parse::<CellId>()
            .and_then(|cell| self.store.reveal_cell(&cell).map(|r| (cell, r)));

        let (cell, reveal) = match reveal {
            Ok(found) => found,
            Err(e) => {
                error!(cell = cell_id, error = %e, "Clue not found");
                return ClickOutcome::NotFound(e);
            }
        };

        if !reveal.changed {
            return ClickOutcome::Unchanged(cell);
        }

        surface.set_cell_text(&cell.to_string(), &reveal.text);
        ClickOutcome::Revealed {
            cell,
            state: reveal.state,
        }
    }

    /// Show the loading indicator and relabel the start control.
    pub fn show_loading<U>(&self, surface: &mut U)
    where
        U: Surface + ?Sized,
    {
        surface.set_loading(LoadingView {
            visible: true,
            label: self.config.loading_label.clone(),
        });
    }

    /// Hide the loading indicator and restore the start control's label.
    pub fn hide_loading<U>(&self, surface: &mut U)
    where
        U: Surface + ?Sized,
    {
        surface.set_loading(LoadingView {
            visible: false,
            label: self.config.idle_label.clone(),
        });
    }
}

/// Lay a board out as a table: titles across the top, one row per clue index.
///
/// Cells show the hidden glyph until their clue is revealed.
pub fn build_table(board: &Board, config: &GameConfig) -> Table {
    let header = board
        .categories()
        .iter()
        .map(|c| {
            if c.is_placeholder() {
                config.unavailable_title.clone()
            } else {
                c.title().to_string()
            }
        })
        .collect();

    let rows = (0..board.clues_per_category())
        .map(|index| {
            board
                .categories()
                .iter()
                .zip(board.row_ids(index))
                .map(|(category, id)| TableCell {
                    id: id.to_string(),
                    text: category
                        .clue(index)
                        .and_then(|clue| clue.visible_text())
                        .unwrap_or(config.hidden_glyph.as_str())
                        .to_string(),
                })
                .collect()
        })
        .collect();

    Table { header, rows }
}
