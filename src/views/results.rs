use serde::{Deserialize, Serialize};

use crate::models::search::MatchRecord;
use crate::rendering::text::{Mark, Node, TextLeaf, TextTree};
use crate::rendering::escape_html;
use crate::search::{SearchError, SearchPattern, SearchQuery};

pub const NO_RESULTS_MESSAGE: &str = "No search results found.";

/// State of the search panel after the last query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<T> {
    /// No search has run, or the query was blank.
    Cleared,
    Found(Vec<T>),
    /// The query failed to compile; carries the displayable message.
    Failed(String),
}

impl<T> Default for SearchOutcome<T> {
    fn default() -> Self {
        SearchOutcome::Cleared
    }
}

/// One clickable row of the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub index: usize,
    pub label: Option<String>,
    /// `...{context}...` with occurrences of the match wrapped in highlight
    /// spans; already escaped.
    pub preview_html: String,
}

impl<T: MatchRecord> SearchOutcome<T> {
    /// Run `search` for `query`, mapping a blank query to [`Self::Cleared`].
    pub fn run<F>(query: &SearchQuery, search: F) -> Self
    where
        F: FnOnce(&SearchQuery) -> Result<Vec<T>, SearchError>,
    {
        if query.is_blank() {
            return SearchOutcome::Cleared;
        }
        match search(query) {
            Ok(results) => SearchOutcome::Found(results),
            Err(e) => {
                tracing::debug!(query = %query.text, error = %e, "search failed");
                SearchOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn results(&self) -> &[T] {
        match self {
            SearchOutcome::Found(results) => results,
            _ => &[],
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.results().get(index)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Line shown above the result list.
    pub fn summary(&self) -> Option<String> {
        match self {
            SearchOutcome::Cleared => None,
            SearchOutcome::Failed(message) => Some(message.clone()),
            SearchOutcome::Found(results) if results.is_empty() => {
                Some(NO_RESULTS_MESSAGE.to_string())
            }
            SearchOutcome::Found(results) => Some(summary_text(results.len())),
        }
    }

    pub fn entries(&self) -> Vec<ResultEntry> {
        self.results()
            .iter()
            .enumerate()
            .map(|(index, record)| ResultEntry {
                index,
                label: record.label(),
                preview_html: preview_html(record),
            })
            .collect()
    }
}

pub fn summary_text(count: usize) -> String {
    format!("Found {count} result(s).")
}

/// Escaped `...{context}...` with every case-insensitive occurrence of the
/// matched text highlighted.
pub fn preview_html(record: &impl MatchRecord) -> String {
    let context = record.context();
    let mut leaf = TextLeaf::new(context);

    match SearchPattern::literal(record.matched(), false) {
        Ok(pattern) => {
            for found in pattern.find_all(context) {
                leaf.mark_range(found.start, found.end, Mark::Search);
            }
        }
        Err(_) => return format!("...{}...", escape_html(context)),
    }

    let highlighted = TextTree::new(vec![Node::Text(leaf)]).to_html();
    format!("...{highlighted}...")
}
