//! Literal and regex search over page text and slide content, plus the
//! highlight marks that make results visible.

pub mod engine;
pub mod highlight;
pub mod pattern;

use thiserror::Error;

pub use engine::{
    page_matches, search_corpus, search_page, search_slides, ContextMatch, CONTEXT_RADIUS,
};
pub use highlight::{apply_highlights, clear_highlights, jump_to};
pub use pattern::{CharMatch, SearchPattern, SearchQuery};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The query is not a valid regular expression.
    #[error("Search error: {0}")]
    Pattern(String),
}
