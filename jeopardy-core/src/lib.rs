//! Jeopardy board engine.
//!
//! This crate provides:
//! - A clue store with a three-state reveal machine per clue
//! - A board controller that fetches categories in one concurrent batch,
//!   renders them to a table surface, and answers cell clicks
//! - Category sources backed by the jService API or generated offline
//!
//! # Quick Start
//!
//! ```ignore
//! use jeopardy_core::{BoardController, GameConfig, MemorySurface, OfflineSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GameConfig::default();
//!     let source = OfflineSource::new(config.clues_per_category);
//!     let mut controller = BoardController::new(source, config);
//!     let mut surface = MemorySurface::new();
//!
//!     controller.start_game(&mut surface).await;
//!     controller.on_cell_click("category-1-0", &mut surface);
//!     println!("{:?}", surface.cell_text("category-1-0"));
//! }
//! ```

pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod slug;
pub mod source;
pub mod store;
pub mod surface;
pub mod testing;

// Primary public API
pub use board::{Board, Category, CategoryId, CellId, Clue, Reveal, RevealState};
pub use config::GameConfig;
pub use controller::{AbortReason, BoardController, ClickOutcome, StartOutcome};
pub use error::{LookupError, SourceError};
pub use slug::slugify;
pub use source::{CategoryData, CategorySource, JServiceSource, OfflineSource};
pub use store::ClueStore;
pub use surface::{LoadingView, MemorySurface, Surface, Table, TableCell};
pub use testing::{ScriptedSource, TestHarness};

// Re-export the client so front ends need only this crate.
pub use jservice::JService;
