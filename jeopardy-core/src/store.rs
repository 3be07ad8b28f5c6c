//! Clue Store: the loaded board plus lookup and reveal by cell address.

use crate::board::{Board, Category, CategoryId, CellId, Clue, Reveal};
use crate::error::{LookupError, SourceError};
use crate::source::{CategoryData, CategorySource};
use futures::future::join_all;
use tracing::{debug, info, warn};

/// Outcome of fetching one category in a batch.
pub type FetchResult = (CategoryId, Result<CategoryData, SourceError>);

/// Holds the current board. Replaced wholesale by [`ClueStore::load`].
#[derive(Debug, Clone, Default)]
pub struct ClueStore {
    board: Board,
    generation: u64,
}

impl ClueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of boards loaded so far. Bumped on every replacement.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fetch every category concurrently and replace the board with the result.
    ///
    /// A category whose fetch fails becomes a placeholder; the rest of the
    /// batch is unaffected.
    pub async fn load<S>(&mut self, source: &S, ids: &[CategoryId], clue_count: usize) -> &Board
    where
        S: CategorySource + ?Sized,
    {
        let results = fetch_all(source, ids).await;
        self.replace(build_board(results, clue_count));
        &self.board
    }

    /// Swap in a new board, invalidating every cell of the previous one.
    pub fn replace(&mut self, board: Board) {
        self.board = board;
        self.generation += 1;
        info!(
            generation = self.generation,
            categories = self.board.len(),
            unavailable = self.board.placeholder_count(),
            "Board loaded"
        );
    }

    /// Resolve a slug and clue index to the backing clue.
    pub fn find_clue(&self, slug: &str, index: usize) -> Result<&Clue, LookupError> {
        self.board.find_clue(slug, index)
    }

    /// Parse a rendered cell id and resolve it.
    pub fn find_cell(&self, cell_id: &str) -> Result<(CellId, &Clue), LookupError> {
        let id: CellId = cell_id.parse()?;
        let clue = self.board.find_clue(&id.slug, id.index)?;
        Ok((id, clue))
    }

    /// Advance one clue's reveal state.
    pub fn reveal(clue: &mut Clue) -> Reveal {
        clue.reveal()
    }

    /// Look up a cell and advance its clue.
    pub fn reveal_cell(&mut self, cell: &CellId) -> Result<Reveal, LookupError> {
        let clue = self.board.find_clue_mut(&cell.slug, cell.index)?;
        Ok(Self::reveal(clue))
    }
}

/// Issue every category request at once and wait for all of them.
///
/// Results come back in `ids` order, each tagged with its id.
pub async fn fetch_all<S>(source: &S, ids: &[CategoryId]) -> Vec<FetchResult>
where
    S: CategorySource + ?Sized,
{
    debug!(count = ids.len(), "Fetching categories");
    let fetches = ids.iter().map(|&id| async move { (id, source.category(id).await) });
    join_all(fetches).await
}

/// Turn a batch of fetch results into a board, degrading failures to placeholders.
pub fn build_board(results: Vec<FetchResult>, clue_count: usize) -> Board {
    let categories = results
        .into_iter()
        .map(|(id, result)| match result {
            Ok(data) => Category::new(data.title, data.clues, clue_count).with_id(id),
            Err(e) => {
                warn!(category = %id, error = %e, "Category fetch failed; using placeholder");
                Category::placeholder(Some(id))
            }
        })
        .collect();

    Board::new(categories, clue_count)
}
