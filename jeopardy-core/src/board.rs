//! Board data model: categories, clues, and the reveal state machine.
//!
//! A [`Board`] is built once per game and never patched. Every category on a
//! board carries a slug that is unique within that board, so a rendered
//! [`CellId`] (`<slug>-<index>`) resolves to at most one clue.

use crate::error::LookupError;
use crate::slug::unique_slugs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Question and answer text used to pad short categories.
pub const UNAVAILABLE_CLUE_TEXT: &str = "(clue unavailable)";

/// Opaque category identifier handed out by a category source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a clue cell is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    #[default]
    Hidden,
    Question,
    Answer,
}

impl RevealState {
    /// The state a click moves to. `Answer` is terminal.
    pub fn next(self) -> Self {
        match self {
            RevealState::Hidden => RevealState::Question,
            RevealState::Question | RevealState::Answer => RevealState::Answer,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == RevealState::Answer
    }
}

/// Result of a reveal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    /// Text the cell should display after the transition.
    pub text: String,
    /// State after the transition.
    pub state: RevealState,
    /// False when the clue was already showing its answer.
    pub changed: bool,
}

/// A single question/answer pair with its reveal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    state: RevealState,
}

impl Clue {
    /// Create a hidden clue.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            state: RevealState::Hidden,
        }
    }

    /// Filler for categories that came back with too few clues.
    pub fn unavailable() -> Self {
        Self::new(UNAVAILABLE_CLUE_TEXT, UNAVAILABLE_CLUE_TEXT)
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Advance the reveal state machine.
    ///
    /// Hidden shows the question, Question shows the answer, and Answer
    /// stays on the answer.
    pub fn reveal(&mut self) -> Reveal {
        let previous = self.state;
        self.state = previous.next();

        Reveal {
            text: self.text_for(self.state).unwrap_or_default().to_string(),
            state: self.state,
            changed: previous != self.state,
        }
    }

    /// Text currently showing, or `None` while hidden.
    pub fn visible_text(&self) -> Option<&str> {
        self.text_for(self.state)
    }

    fn text_for(&self, state: RevealState) -> Option<&str> {
        match state {
            RevealState::Hidden => None,
            RevealState::Question => Some(&self.question),
            RevealState::Answer => Some(&self.answer),
        }
    }
}

/// A named group of clues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Source identifier, if the category came from a source.
    pub id: Option<CategoryId>,
    title: String,
    slug: String,
    clues: Vec<Clue>,
    placeholder: bool,
}

impl Category {
    /// Create a category from raw clues, truncating or padding them to
    /// exactly `clue_count` entries.
    pub fn new(title: impl Into<String>, mut clues: Vec<Clue>, clue_count: usize) -> Self {
        clues.truncate(clue_count);
        clues.resize_with(clue_count, Clue::unavailable);

        let title = title.into();
        Self {
            id: None,
            slug: crate::slug::slugify(&title),
            title,
            clues,
            placeholder: false,
        }
    }

    /// Stand-in for a category whose fetch failed: empty title, no clues.
    pub fn placeholder(id: Option<CategoryId>) -> Self {
        Self {
            id,
            title: String::new(),
            slug: String::new(),
            clues: Vec::new(),
            placeholder: true,
        }
    }

    pub fn with_id(mut self, id: CategoryId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Slug addressing this category's cells. Unique within its board.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn clue(&self, index: usize) -> Option<&Clue> {
        self.clues.get(index)
    }

    pub fn clue_mut(&mut self, index: usize) -> Option<&mut Clue> {
        self.clues.get_mut(index)
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// Address of a body cell: category slug plus clue index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellId {
    pub slug: String,
    pub index: usize,
}

impl CellId {
    pub fn new(slug: impl Into<String>, index: usize) -> Self {
        Self {
            slug: slug.into(),
            index,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.slug, self.index)
    }
}

impl FromStr for CellId {
    type Err = LookupError;

    /// Split at the last `-`, since slugs may themselves contain dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LookupError::MalformedCellId(s.to_string());

        let (slug, index) = s.rsplit_once('-').ok_or_else(malformed)?;
        if slug.is_empty() {
            return Err(malformed());
        }
        let raw = index;
        let index = raw.parse::<usize>().map_err(|_| malformed())?;
        // Only the exact text `Display` produces names a cell.
        if index.to_string() != raw {
            return Err(malformed());
        }

        Ok(Self::new(slug, index))
    }
}

/// The full set of categories for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    categories: Vec<Category>,
    clues_per_category: usize,
}

impl Board {
    /// Build a board, reassigning slugs so that each is unique.
    pub fn new(mut categories: Vec<Category>, clues_per_category: usize) -> Self {
        let slugs = unique_slugs(categories.iter().map(|c| c.title.as_str()));
        for (category, slug) in categories.iter_mut().zip(slugs) {
            category.slug = slug;
        }

        Self {
            categories,
            clues_per_category,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of clue rows the board renders.
    pub fn clues_per_category(&self) -> usize {
        self.clues_per_category
    }

    /// Number of categories that failed to load.
    pub fn placeholder_count(&self) -> usize {
        self.categories.iter().filter(|c| c.is_placeholder()).count()
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Resolve a cell address to its clue.
    pub fn find_clue(&self, slug: &str, index: usize) -> Result<&Clue, LookupError> {
        self.category_by_slug(slug)
            .ok_or_else(|| LookupError::UnknownCategory(slug.to_string()))?
            .clue(index)
            .ok_or_else(|| LookupError::ClueOutOfRange {
                slug: slug.to_string(),
                index,
            })
    }

    pub fn find_clue_mut(&mut self, slug: &str, index: usize) -> Result<&mut Clue, LookupError> {
        self.categories
            .iter_mut()
            .find(|c| c.slug == slug)
            .ok_or_else(|| LookupError::UnknownCategory(slug.to_string()))?
            .clue_mut(index)
            .ok_or_else(|| LookupError::ClueOutOfRange {
                slug: slug.to_string(),
                index,
            })
    }

    /// Body cell ids for one clue row, in category order.
    pub fn row_ids(&self, index: usize) -> impl Iterator<Item = CellId> + '_ {
        self.categories
            .iter()
            .map(move |c| CellId::new(c.slug.clone(), index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_clues(n: usize) -> Vec<Clue> {
        (0..n)
            .map(|i| Clue::new(format!("Q{i}"), format!("A{i}")))
            .collect()
    }

    #[test]
    fn test_reveal_sequence() {
        let mut clue = Clue::new("What is H2O?", "Water");
        assert_eq!(clue.state(), RevealState::Hidden);
        assert_eq!(clue.visible_text(), None);

        let first = clue.reveal();
        assert_eq!(first.text, "What is H2O?");
        assert_eq!(first.state, RevealState::Question);
        assert!(first.changed);

        let second = clue.reveal();
        assert_eq!(second.text, "Water");
        assert_eq!(second.state, RevealState::Answer);
        assert!(second.changed);

        let third = clue.reveal();
        assert_eq!(third.text, "Water");
        assert_eq!(third.state, RevealState::Answer);
        assert!(!third.changed);
    }

    #[test]
    fn test_reveal_never_regresses() {
        let order = |s: RevealState| match s {
            RevealState::Hidden => 0,
            RevealState::Question => 1,
            RevealState::Answer => 2,
        };

        let mut clue = Clue::new("q", "a");
        let mut last = order(clue.state());
        for _ in 0..10 {
            clue.reveal();
            let now = order(clue.state());
            assert!(now >= last);
            last = now;
        }
        assert!(clue.state().is_terminal());
    }

    #[test]
    fn test_category_truncates_and_pads() {
        let long = Category::new("Long", sample_clues(8), 5);
        assert_eq!(long.clues().len(), 5);
        assert_eq!(long.clues()[4].question, "Q4");

        let short = Category::new("Short", sample_clues(2), 5);
        assert_eq!(short.clues().len(), 5);
        assert_eq!(short.clues()[1].answer, "A1");
        assert_eq!(short.clues()[2].question, UNAVAILABLE_CLUE_TEXT);
        assert!(!short.is_placeholder());
    }

    #[test]
    fn test_placeholder_category() {
        let placeholder = Category::placeholder(Some(CategoryId(7)));
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.title(), "");
        assert!(placeholder.clues().is_empty());
        assert_eq!(placeholder.id, Some(CategoryId(7)));
    }

    #[test]
    fn test_cell_id_roundtrip_with_dashed_slug() {
        let id: CellId = "u-s--history-3".parse().unwrap();
        assert_eq!(id.slug, "u-s--history");
        assert_eq!(id.index, 3);
        assert_eq!(id.to_string(), "u-s--history-3");
    }

    #[test]
    fn test_cell_id_malformed() {
        for bad in [
            "science",
            "-0",
            "science-",
            "science-x",
            "",
            "science-00",
            "science-+0",
            "science-0002",
            "science- 1",
        ] {
            assert!(
                matches!(bad.parse::<CellId>(), Err(LookupError::MalformedCellId(_))),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_board_assigns_unique_slugs() {
        let board = Board::new(
            vec![
                Category::new("Science", sample_clues(5), 5),
                Category::new("science", sample_clues(5), 5),
                Category::placeholder(None),
            ],
            5,
        );

        let slugs: Vec<_> = board.categories().iter().map(|c| c.slug()).collect();
        assert_eq!(slugs, vec!["science", "science-2", "category"]);
        assert_eq!(board.placeholder_count(), 1);
    }

    #[test]
    fn test_find_clue_is_total() {
        let mut board = Board::new(vec![Category::new("Science", sample_clues(5), 5)], 5);

        assert_eq!(board.find_clue("science", 0).unwrap().question, "Q0");
        assert!(matches!(
            board.find_clue("history", 0),
            Err(LookupError::UnknownCategory(_))
        ));
        assert!(matches!(
            board.find_clue("science", 5),
            Err(LookupError::ClueOutOfRange { index: 5, .. })
        ));
        assert!(board.find_clue("", usize::MAX).is_err());

        board.find_clue_mut("science", 1).unwrap().reveal();
        assert_eq!(
            board.find_clue("science", 1).unwrap().state(),
            RevealState::Question
        );
    }

    #[test]
    fn test_row_ids() {
        let board = Board::new(
            vec![
                Category::new("Science", sample_clues(5), 5),
                Category::new("Sports", sample_clues(5), 5),
            ],
            5,
        );
        let ids: Vec<String> = board.row_ids(2).map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["science-2", "sports-2"]);
    }
}
