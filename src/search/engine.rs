use crate::models::search::{SearchMatch, SlideMatch};
use crate::models::slide::Slide;

use super::pattern::{CharMatch, SearchPattern, SearchQuery};
use super::SearchError;

/// Characters of context kept on each side of a match.
pub const CONTEXT_RADIUS: usize = 50;

/// A match together with its surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMatch {
    pub found: CharMatch,
    /// Up to `radius` characters either side of the match, clipped to the
    /// corpus; contains the match at character offset `min(radius, start)`.
    pub context: String,
}

/// Every match of `pattern` in `corpus`, left to right.
pub fn search_corpus(corpus: &str, pattern: &SearchPattern, radius: usize) -> Vec<ContextMatch> {
    pattern
        .find_all(corpus)
        .map(|found| {
            let context = context_window(corpus, &found, radius).to_string();
            ContextMatch { found, context }
        })
        .collect()
}

fn context_window<'a>(corpus: &'a str, found: &CharMatch, radius: usize) -> &'a str {
    let start = corpus[..found.byte_start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(found.byte_start);
    let end = corpus[found.byte_end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| found.byte_end + i)
        .unwrap_or(corpus.len());
    &corpus[start..end]
}

/// Search the rendered text of a page.
///
/// A blank query yields no results; an invalid regex is an error.
pub fn search_page(
    text: &str,
    query: &SearchQuery,
    radius: usize,
) -> Result<Vec<SearchMatch>, SearchError> {
    let Some(pattern) = query.compile()? else {
        return Ok(Vec::new());
    };

    let results = page_matches(text, &pattern, radius);
    tracing::debug!(query = %query.text, results = results.len(), "page search");
    Ok(results)
}

/// Numbered page results for an already compiled pattern.
pub fn page_matches(text: &str, pattern: &SearchPattern, radius: usize) -> Vec<SearchMatch> {
    search_corpus(text, pattern, radius)
        .into_iter()
        .enumerate()
        .map(|(index, m)| SearchMatch {
            index,
            matched: m.found.text,
            context: m.context,
            position: m.found.start,
        })
        .collect()
}

/// Search each slide's raw content, in slide order.
pub fn search_slides(
    slides: &[Slide],
    query: &SearchQuery,
    radius: usize,
) -> Result<Vec<SlideMatch>, SearchError> {
    let Some(pattern) = query.compile()? else {
        return Ok(Vec::new());
    };

    let results: Vec<SlideMatch> = slides
        .iter()
        .enumerate()
        .flat_map(|(slide_index, slide)| {
            search_corpus(&slide.raw_content, &pattern, radius)
                .into_iter()
                .map(move |m| SlideMatch {
                    slide_index,
                    slide_title: slide.title.clone(),
                    matched: m.found.text,
                    context: m.context,
                    position: m.found.start,
                })
        })
        .collect();

    tracing::debug!(query = %query.text, results = results.len(), "slide search");
    Ok(results)
}
