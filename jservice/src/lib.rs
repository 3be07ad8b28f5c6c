//! Minimal jService trivia API client.
//!
//! This crate provides a focused client for the two endpoints a game board
//! needs:
//! - `GET /categories` for a page of category summaries
//! - `GET /category?id=` for a single category with its clues
//!
//! Clue text is cleaned on the way in (HTML tags stripped, escaped quotes
//! unescaped), so callers can show it as-is.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Base URL used when `JSERVICE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://rithm-jeopardy.herokuapp.com/api";

/// Largest page the categories endpoint will return.
pub const MAX_PAGE_SIZE: usize = 100;

/// Errors that can occur when using the jService client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// jService API client.
#[derive(Clone)]
pub struct JService {
    client: reqwest::Client,
    base_url: String,
}

impl JService {
    /// Create a new client against the given base URL (including the `/api` segment).
    ///
    /// No request timeout is set; use [`JService::with_timeout`] to add one.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `JSERVICE_URL` environment variable,
    /// falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        match std::env::var("JSERVICE_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }

    /// Rebuild the HTTP client with a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(self)
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a page of category summaries.
    ///
    /// `count` is clamped to [`MAX_PAGE_SIZE`].
    pub async fn categories(
        &self,
        count: usize,
        offset: usize,
    ) -> Result<Vec<CategorySummary>, Error> {
        let count = count.clamp(1, MAX_PAGE_SIZE);
        let summaries: Vec<ApiCategorySummary> = self
            .get_json(
                "categories",
                &[("count", count.to_string()), ("offset", offset.to_string())],
            )
            .await?;

        Ok(summaries.into_iter().map(CategorySummary::from).collect())
    }

    /// Fetch one category with all of its clues.
    pub async fn category(&self, id: u64) -> Result<CategoryDetail, Error> {
        let detail: ApiCategoryDetail = self
            .get_json("category", &[("id", id.to_string())])
            .await?;

        Ok(CategoryDetail::from(detail))
    }

    async fn get_json<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T, Error>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(self.endpoint_url(endpoint))
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }
}

// ============================================================================
// Public types
// ============================================================================

/// One entry from the categories listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub id: u64,
    pub title: String,
    pub clues_count: usize,
}

/// A category with its clues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDetail {
    pub id: u64,
    pub title: String,
    pub clues: Vec<ClueData>,
}

/// A single question/answer pair as served by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueData {
    pub question: String,
    pub answer: String,
}

/// Strip markup and escape artifacts from clue text.
///
/// The archive stores answers like `<i>Moby Dick</i>` and `Rock \'n\' roll`.
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // A bare `<` (as in `3 < 5`) is text, not the start of a tag.
            '<' if !in_tag
                && chars
                    .peek()
                    .is_some_and(|n| n.is_ascii_alphabetic() || matches!(n, '/' | '!')) =>
            {
                in_tag = true
            }
            '>' if in_tag => in_tag = false,
            '\\' if !in_tag => match chars.peek() {
                Some(&(next @ ('\'' | '"'))) => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push(c),
            },
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    out.trim().to_string()
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiCategorySummary {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    clues_count: Option<usize>,
}

impl From<ApiCategorySummary> for CategorySummary {
    fn from(api: ApiCategorySummary) -> Self {
        Self {
            id: api.id,
            title: api.title.map(|t| clean_text(&t)).unwrap_or_default(),
            clues_count: api.clues_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiCategoryDetail {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    clues: Vec<ApiClue>,
}

impl From<ApiCategoryDetail> for CategoryDetail {
    fn from(api: ApiCategoryDetail) -> Self {
        Self {
            id: api.id,
            title: api.title.map(|t| clean_text(&t)).unwrap_or_default(),
            clues: api
                .clues
                .into_iter()
                .map(|c| ClueData {
                    question: c.question.map(|q| clean_text(&q)).unwrap_or_default(),
                    answer: c.answer.map(|a| clean_text(&a)).unwrap_or_default(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiClue {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORY_JSON: &str = r#"{
        "id": 2,
        "title": "baseball",
        "clues_count": 3,
        "clues": [
            {"id": 1, "answer": "<i>the Yankees</i>", "question": "Babe Ruth's team", "value": 200, "category_id": 2},
            {"id": 2, "answer": "Rock \\'n\\' roll", "question": null, "value": 400, "category_id": 2},
            {"id": 3, "question": "Cooperstown is home to this", "value": null, "category_id": 2}
        ]
    }"#;

    #[test]
    fn test_client_creation() {
        let client = JService::new("http://localhost:3000/api/");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.endpoint_url("category"), "http://localhost:3000/api/category");
    }

    #[test]
    fn test_client_with_timeout() {
        let client = JService::new(DEFAULT_BASE_URL)
            .with_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("<i>Moby Dick</i>"), "Moby Dick");
        assert_eq!(clean_text("Rock \\'n\\' roll"), "Rock 'n' roll");
        assert_eq!(clean_text("  a \\\"quoted\\\" word "), "a \"quoted\" word");
        assert_eq!(clean_text("back\\slash"), "back\\slash");
        assert_eq!(clean_text("<a href=\"x\">link</a> text"), "link text");
    }

    #[test]
    fn test_clean_text_keeps_bare_angle_brackets() {
        assert_eq!(clean_text("3 < 5 is true"), "3 < 5 is true");
        assert_eq!(clean_text("a <= b and b > c"), "a <= b and b > c");
        assert_eq!(clean_text("x<br/>y <!-- note -->z"), "xy z");
        assert_eq!(clean_text("trailing <"), "trailing <");
    }

    #[test]
    fn test_parse_category_detail() {
        let api: ApiCategoryDetail = serde_json::from_str(CATEGORY_JSON).unwrap();
        let detail = CategoryDetail::from(api);

        assert_eq!(detail.id, 2);
        assert_eq!(detail.title, "baseball");
        assert_eq!(detail.clues.len(), 3);
        assert_eq!(detail.clues[0].answer, "the Yankees");
        assert_eq!(detail.clues[1].answer, "Rock 'n' roll");
        assert_eq!(detail.clues[1].question, "");
        assert_eq!(detail.clues[2].answer, "");
    }

    #[test]
    fn test_parse_category_summaries() {
        let json = r#"[
            {"id": 11, "title": "science", "clues_count": 5},
            {"id": 12, "title": null, "clues_count": 10},
            {"id": 13}
        ]"#;
        let api: Vec<ApiCategorySummary> = serde_json::from_str(json).unwrap();
        let summaries: Vec<CategorySummary> = api.into_iter().map(Into::into).collect();

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].title, "science");
        assert_eq!(summaries[1].title, "");
        assert_eq!(summaries[1].clues_count, 10);
        assert_eq!(summaries[2].clues_count, 0);
    }

    #[test]
    fn test_parse_detail_without_clues() {
        let api: ApiCategoryDetail = serde_json::from_str(r#"{"id": 9, "title": "empty"}"#).unwrap();
        let detail = CategoryDetail::from(api);
        assert!(detail.clues.is_empty());
    }

    /// Hits the live API. Run with `cargo test -p jservice -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_live_category_roundtrip() {
        let client = JService::from_env();
        let page = client.categories(10, 0).await.unwrap();
        assert!(!page.is_empty());

        let detail = client.category(page[0].id).await.unwrap();
        assert_eq!(detail.id, page[0].id);
    }
}
