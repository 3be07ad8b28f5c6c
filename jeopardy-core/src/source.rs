//! Where categories come from.
//!
//! The controller only sees [`CategorySource`]. [`JServiceSource`] talks to
//! the trivia API; [`OfflineSource`] generates a board locally.

use crate::board::{CategoryId, Clue};
use crate::error::SourceError;
use async_trait::async_trait;
use jservice::{CategorySummary, JService};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Raw category contents as returned by a source, before fitting to a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryData {
    pub title: String,
    pub clues: Vec<Clue>,
}

/// Supplier of category identifiers and category contents.
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Request `count` category identifiers.
    ///
    /// An empty result means no game can be started.
    async fn category_ids(&self, count: usize) -> Result<Vec<CategoryId>, SourceError>;

    /// Fetch one category's title and clues.
    async fn category(&self, id: CategoryId) -> Result<CategoryData, SourceError>;
}

#[async_trait]
impl<T: CategorySource + ?Sized> CategorySource for Box<T> {
    async fn category_ids(&self, count: usize) -> Result<Vec<CategoryId>, SourceError> {
        (**self).category_ids(count).await
    }

    async fn category(&self, id: CategoryId) -> Result<CategoryData, SourceError> {
        (**self).category(id).await
    }
}

/// Categories from the jService API.
#[derive(Clone)]
pub struct JServiceSource {
    client: JService,
    min_clues: usize,
    page_size: usize,
    max_offset: usize,
}

impl JServiceSource {
    /// Create a source that prefers categories with at least `min_clues` clues.
    pub fn new(client: JService, min_clues: usize) -> Self {
        Self {
            client,
            min_clues,
            page_size: jservice::MAX_PAGE_SIZE,
            max_offset: 0,
        }
    }

    /// Pick the listing page at a random offset in `0..=max_offset`.
    ///
    /// The public archive holds thousands of categories; smaller mirrors
    /// only have a page's worth, which is why this defaults to zero.
    pub fn with_max_offset(mut self, max_offset: usize) -> Self {
        self.max_offset = max_offset;
        self
    }

    /// Set how many summaries are requested per listing call.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

#[async_trait]
impl CategorySource for JServiceSource {
    async fn category_ids(&self, count: usize) -> Result<Vec<CategoryId>, SourceError> {
        let offset = rand::thread_rng().gen_range(0..=self.max_offset);
        debug!(offset, page_size = self.page_size, "Listing categories");

        let page = self.client.categories(self.page_size, offset).await?;
        let ids = pick_ids(&page, count, self.min_clues, &mut rand::thread_rng());
        Ok(ids)
    }

    async fn category(&self, id: CategoryId) -> Result<CategoryData, SourceError> {
        let detail = self.client.category(id.0).await?;

        Ok(CategoryData {
            title: detail.title,
            clues: detail
                .clues
                .into_iter()
                .map(|c| Clue::new(c.question, c.answer))
                .collect(),
        })
    }
}

/// Choose `count` ids at random, preferring categories with enough clues
/// and falling back to the rest only when there are too few of those.
pub fn pick_ids<R: Rng + ?Sized>(
    page: &[CategorySummary],
    count: usize,
    min_clues: usize,
    rng: &mut R,
) -> Vec<CategoryId> {
    let (full, short): (Vec<_>, Vec<_>) = page.iter().partition(|c| c.clues_count >= min_clues);

    let mut picked: Vec<CategoryId> = full
        .choose_multiple(rng, count)
        .map(|c| CategoryId(c.id))
        .collect();

    if picked.len() < count {
        let missing = count - picked.len();
        picked.extend(
            short
                .choose_multiple(rng, missing)
                .map(|c| CategoryId(c.id)),
        );
    }

    picked
}

/// Locally generated categories for playing without network access.
#[derive(Debug, Clone)]
pub struct OfflineSource {
    clues_per_category: usize,
}

impl OfflineSource {
    pub fn new(clues_per_category: usize) -> Self {
        Self { clues_per_category }
    }
}

#[async_trait]
impl CategorySource for OfflineSource {
    async fn category_ids(&self, count: usize) -> Result<Vec<CategoryId>, SourceError> {
        debug!(count, "Generating offline category ids");
        Ok((1..=count as u64).map(CategoryId).collect())
    }

    async fn category(&self, id: CategoryId) -> Result<CategoryData, SourceError> {
        Ok(CategoryData {
            title: format!("Category {id}"),
            clues: (1..=self.clues_per_category)
                .map(|n| {
                    Clue::new(
                        format!("Mock Question {n} for Category {id}"),
                        format!("Mock Answer {n}"),
                    )
                })
                .collect(),
        })
    }
}
