//! Game configuration.

/// Default number of category columns.
pub const DEFAULT_CATEGORIES: usize = 6;

/// Default number of clue rows.
pub const DEFAULT_CLUES_PER_CATEGORY: usize = 5;

/// Configuration for a board controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// How many categories to request per game.
    pub categories: usize,

    /// How many clues each category shows.
    pub clues_per_category: usize,

    /// Text shown in a cell before it is revealed.
    pub hidden_glyph: String,

    /// Start-control label while a game is loading.
    pub loading_label: String,

    /// Start-control label once a game is loaded (or loading gave up).
    pub idle_label: String,

    /// Header text for a category that failed to load.
    pub unavailable_title: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES,
            clues_per_category: DEFAULT_CLUES_PER_CATEGORY,
            hidden_glyph: "?".to_string(),
            loading_label: "Loading...".to_string(),
            idle_label: "Restart Game".to_string(),
            unavailable_title: "(unavailable)".to_string(),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of categories.
    pub fn with_categories(mut self, categories: usize) -> Self {
        self.categories = categories;
        self
    }

    /// Set the number of clues per category.
    pub fn with_clues_per_category(mut self, clues: usize) -> Self {
        self.clues_per_category = clues;
        self
    }

    /// Set the glyph shown on hidden cells.
    pub fn with_hidden_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.hidden_glyph = glyph.into();
        self
    }

    /// Set the loading and idle labels of the start control.
    pub fn with_labels(mut self, loading: impl Into<String>, idle: impl Into<String>) -> Self {
        self.loading_label = loading.into();
        self.idle_label = idle.into();
        self
    }

    /// Set the header text for categories that failed to load.
    pub fn with_unavailable_title(mut self, title: impl Into<String>) -> Self {
        self.unavailable_title = title.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.categories, 6);
        assert_eq!(config.clues_per_category, 5);
        assert_eq!(config.hidden_glyph, "?");
        assert_eq!(config.loading_label, "Loading...");
        assert_eq!(config.idle_label, "Restart Game");
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_categories(3)
            .with_clues_per_category(2)
            .with_hidden_glyph("$")
            .with_labels("Fetching", "Play again")
            .with_unavailable_title("n/a");

        assert_eq!(config.categories, 3);
        assert_eq!(config.clues_per_category, 2);
        assert_eq!(config.hidden_glyph, "$");
        assert_eq!(config.loading_label, "Fetching");
        assert_eq!(config.idle_label, "Play again");
        assert_eq!(config.unavailable_title, "n/a");
    }
}
