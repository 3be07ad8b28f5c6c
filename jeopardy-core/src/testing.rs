//! Testing utilities for the board engine.
//!
//! This module provides tools for deterministic tests:
//! - `ScriptedSource` serving fixed categories without network access
//! - `TestHarness` pairing a controller with an in-memory surface

use crate::board::{CategoryId, Clue};
use crate::config::GameConfig;
use crate::controller::{BoardController, ClickOutcome, StartOutcome};
use crate::error::SourceError;
use crate::source::{CategoryData, CategorySource};
use crate::surface::MemorySurface;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A category source that serves scripted data.
///
/// `category_ids` returns the scripted id list as-is, ignoring the
/// requested count, so tests can check that callers trim it.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    order: Vec<CategoryId>,
    ids: Option<Vec<CategoryId>>,
    categories: HashMap<CategoryId, CategoryData>,
    failing: HashSet<CategoryId>,
    ids_fail_after: Option<usize>,
    id_calls: AtomicUsize,
    category_calls: AtomicUsize,
}

impl ScriptedSource {
    /// An empty source: no ids, no categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` categories titled `Category 1..=count`, each with `clues` clues.
    pub fn generated(count: u64, clues: usize) -> Self {
        (1..=count).fold(Self::new(), |source, id| {
            source.with_category(CategoryId(id), format!("Category {id}"), clues)
        })
    }

    /// Add a category whose clues read `<title> question N` / `<title> answer N`.
    pub fn with_category(self, id: CategoryId, title: impl Into<String>, clues: usize) -> Self {
        let title = title.into();
        let clues = (1..=clues)
            .map(|n| Clue::new(format!("{title} question {n}"), format!("{title} answer {n}")))
            .collect();
        self.with_clues(id, title, clues)
    }

    /// Add a category with explicit clues.
    pub fn with_clues(mut self, id: CategoryId, title: impl Into<String>, clues: Vec<Clue>) -> Self {
        self.order.push(id);
        self.categories.insert(
            id,
            CategoryData {
                title: title.into(),
                clues,
            },
        );
        self
    }

    /// Override the id list returned by `category_ids`.
    pub fn with_ids(mut self, ids: Vec<CategoryId>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Make fetching this category fail.
    pub fn failing(mut self, id: CategoryId) -> Self {
        self.failing.insert(id);
        self
    }

    /// Make every `category_ids` call fail.
    pub fn failing_ids(self) -> Self {
        self.failing_ids_after(0)
    }

    /// Let the first `calls` id requests succeed and fail the rest.
    pub fn failing_ids_after(mut self, calls: usize) -> Self {
        self.ids_fail_after = Some(calls);
        self
    }

    /// Number of `category_ids` calls so far.
    pub fn id_calls(&self) -> usize {
        self.id_calls.load(Ordering::SeqCst)
    }

    /// Number of `category` calls so far.
    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategorySource for ScriptedSource {
    async fn category_ids(&self, _count: usize) -> Result<Vec<CategoryId>, SourceError> {
        let call = self.id_calls.fetch_add(1, Ordering::SeqCst);
        if self.ids_fail_after.is_some_and(|after| call >= after) {
            return Err(SourceError::IdsUnavailable("scripted failure".to_string()));
        }

        Ok(self.ids.clone().unwrap_or_else(|| self.order.clone()))
    }

    async fn category(&self, id: CategoryId) -> Result<CategoryData, SourceError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&id) {
            return Err(SourceError::Unavailable(id));
        }

        self.categories
            .get(&id)
            .cloned()
            .ok_or(SourceError::Unavailable(id))
    }
}

/// Test harness pairing a controller with an in-memory surface.
pub struct TestHarness<S = ScriptedSource> {
    /// The controller under test.
    pub controller: BoardController<S>,
    /// The surface it renders to.
    pub surface: MemorySurface,
}

impl<S: CategorySource> TestHarness<S> {
    /// Create a harness with the default game configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, GameConfig::default())
    }

    pub fn with_config(source: S, config: GameConfig) -> Self {
        Self {
            controller: BoardController::new(source, config),
            surface: MemorySurface::new(),
        }
    }

    /// Run the start sequence.
    pub async fn start(&mut self) -> StartOutcome {
        self.controller.start_game(&mut self.surface).await
    }

    /// Click a cell by id.
    pub fn click(&mut self, cell_id: &str) -> ClickOutcome {
        self.controller.on_cell_click(cell_id, &mut self.surface)
    }

    /// Text currently shown in a cell.
    pub fn cell_text(&self, cell_id: &str) -> Option<&str> {
        self.surface.cell_text(cell_id)
    }
}

/// Run `f` with a subscriber that records formatted log lines.
#[cfg(test)]
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    let lines = String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect();
    (result, lines)
}
