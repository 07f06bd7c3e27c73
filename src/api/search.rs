use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::document::DocumentId;
use crate::models::search::{SearchMatch, SlideMatch};
use crate::rendering::Renderer;
use crate::search::SearchQuery;
use crate::storage::client::DocumentSource;
use crate::storage::loader::load_document;
use crate::views::results::{ResultEntry, SearchOutcome};
use crate::views::{PageView, SlideView, ViewMode};

/// Query string of `GET /api/v1/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub file: Option<String>,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub regex: bool,
    #[serde(default)]
    pub mode: ViewMode,
}

impl SearchParams {
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.q.clone())
            .case_sensitive(self.case_sensitive)
            .regex(self.regex)
    }
}

/// Matches in the shape of the mode that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchList {
    Page(Vec<SearchMatch>),
    Slides(Vec<SlideMatch>),
}

impl MatchList {
    pub fn len(&self) -> usize {
        match self {
            MatchList::Page(matches) => matches.len(),
            MatchList::Slides(matches) => matches.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub file: String,
    pub mode: ViewMode,
    /// `Found N result(s).`, the empty-state message, or absent for a blank
    /// query.
    pub summary: Option<String>,
    pub matches: MatchList,
    /// Result-list rows with highlighted previews.
    pub entries: Vec<ResultEntry>,
}

/// Search a document the way the chosen view does: the page view searches
/// the rendered text, the slide view each slide's raw markdown.
///
/// An invalid pattern is a `BadRequest` carrying the search error message.
pub async fn process_search(
    source: &dyn DocumentSource,
    renderer: &Renderer,
    id: &DocumentId,
    params: &SearchParams,
    context_radius: usize,
) -> Result<SearchResponse, AppError> {
    let document = load_document(source, id).await?;
    let query = params.query();

    let (summary, matches, entries) = match params.mode {
        ViewMode::Page => {
            let mut view = PageView::from_document(renderer, &document)
                .with_context_radius(context_radius);
            let outcome = view.search(&query);
            let (summary, entries) = describe(outcome)?;
            (summary, MatchList::Page(outcome.results().to_vec()), entries)
        }
        ViewMode::Slides => {
            let mut view = SlideView::from_document(renderer, &document)
                .with_context_radius(context_radius);
            let outcome = view.search(&query);
            let (summary, entries) = describe(outcome)?;
            (summary, MatchList::Slides(outcome.results().to_vec()), entries)
        }
    };

    tracing::info!(
        document = %id,
        mode = %params.mode,
        query = %params.q,
        matches = matches.len(),
        "search completed"
    );

    Ok(SearchResponse {
        file: id.to_string(),
        mode: params.mode,
        summary,
        matches,
        entries,
    })
}

fn describe<T>(outcome: &SearchOutcome<T>) -> Result<(Option<String>, Vec<ResultEntry>), AppError>
where
    T: crate::models::search::MatchRecord,
{
    match outcome.error() {
        Some(message) => Err(AppError::BadRequest(message.to_string())),
        None => Ok((outcome.summary(), outcome.entries())),
    }
}

/// Axum handler for `GET /api/v1/search`.
#[cfg(feature = "ssr")]
pub async fn search_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Query(params): axum::extract::Query<SearchParams>,
) -> Result<axum::Json<SearchResponse>, AppError> {
    let id = state.document_id(params.file.as_deref())?;
    let response = process_search(
        state.source.as_ref(),
        &state.renderer,
        &id,
        &params,
        state.config.view.context_radius,
    )
    .await?;
    Ok(axum::Json(response))
}
