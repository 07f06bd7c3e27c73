use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::document::DocumentId;
use crate::rendering::toc::{TocEntry, EMPTY_TOC_MESSAGE};
use crate::rendering::Renderer;
use crate::slides::{NavState, OverviewEntry};
use crate::storage::client::DocumentSource;
use crate::storage::loader::load_document;
use crate::views::{PageView, SlideView};

/// Query string shared by the document endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentQuery {
    pub file: Option<String>,
}

/// Rendered page view of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub file: String,
    pub html: String,
    pub toc: Vec<TocEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideResponse {
    pub index: usize,
    pub title: String,
    pub raw_content: String,
    pub html: String,
}

/// A document split into slides, each rendered on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlidesResponse {
    pub file: String,
    pub total: usize,
    pub slides: Vec<SlideResponse>,
    pub overview: Vec<OverviewEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocResponse {
    pub file: String,
    pub entries: Vec<TocEntry>,
    /// Set when the document has no headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn process_document(
    source: &dyn DocumentSource,
    renderer: &Renderer,
    id: &DocumentId,
) -> Result<DocumentResponse, AppError> {
    let document = load_document(source, id).await?;
    let view = PageView::from_document(renderer, &document);

    Ok(DocumentResponse {
        file: id.to_string(),
        html: view.html(),
        toc: view.toc().to_vec(),
    })
}

pub async fn process_slides(
    source: &dyn DocumentSource,
    renderer: &Renderer,
    id: &DocumentId,
    preview_length: usize,
) -> Result<SlidesResponse, AppError> {
    let document = load_document(source, id).await?;
    let mut view = SlideView::from_document(renderer, &document).with_preview_length(preview_length);
    let overview = view.overview();

    let total = view.slides().len();
    let mut slides = Vec::with_capacity(total);
    for index in 0..total {
        view.jump(index);
        let slide = view.current_slide();
        slides.push(SlideResponse {
            index,
            title: slide.title.clone(),
            raw_content: slide.raw_content.clone(),
            html: view.render_current(),
        });
    }

    Ok(SlidesResponse {
        file: id.to_string(),
        total,
        slides,
        overview,
    })
}

/// One slide with its navigation state, for presenters that fetch slides
/// one at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSlideResponse {
    pub file: String,
    pub slide: SlideResponse,
    pub nav: NavState,
}

pub async fn process_slide(
    source: &dyn DocumentSource,
    renderer: &Renderer,
    id: &DocumentId,
    index: usize,
) -> Result<CurrentSlideResponse, AppError> {
    let document = load_document(source, id).await?;
    let mut view = SlideView::from_document(renderer, &document);
    let total = view.slides().len();
    if index >= total {
        return Err(AppError::BadRequest(format!(
            "Slide {} out of range (document has {total} slides)",
            index + 1
        )));
    }
    view.jump(index);

    let slide = view.current_slide();
    Ok(CurrentSlideResponse {
        file: id.to_string(),
        slide: SlideResponse {
            index,
            title: slide.title.clone(),
            raw_content: slide.raw_content.clone(),
            html: view.render_current(),
        },
        nav: view.nav_state(),
    })
}

pub async fn process_toc(
    source: &dyn DocumentSource,
    renderer: &Renderer,
    id: &DocumentId,
) -> Result<TocResponse, AppError> {
    let document = load_document(source, id).await?;
    let view = PageView::from_document(renderer, &document);
    let entries = view.toc().to_vec();
    let message = entries.is_empty().then(|| EMPTY_TOC_MESSAGE.to_string());

    Ok(TocResponse {
        file: id.to_string(),
        entries,
        message,
    })
}

/// Axum handler for `GET /api/v1/document`.
#[cfg(feature = "ssr")]
pub async fn document_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Query(query): axum::extract::Query<DocumentQuery>,
) -> Result<axum::Json<DocumentResponse>, AppError> {
    let id = state.document_id(query.file.as_deref())?;
    let response = process_document(state.source.as_ref(), &state.renderer, &id).await?;
    Ok(axum::Json(response))
}

/// Axum handler for `GET /api/v1/slides`.
#[cfg(feature = "ssr")]
pub async fn slides_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Query(query): axum::extract::Query<DocumentQuery>,
) -> Result<axum::Json<SlidesResponse>, AppError> {
    let id = state.document_id(query.file.as_deref())?;
    let response = process_slides(
        state.source.as_ref(),
        &state.renderer,
        &id,
        state.config.view.preview_length,
    )
    .await?;
    Ok(axum::Json(response))
}

/// Axum handler for `GET /api/v1/slides/{index}` (zero-based).
#[cfg(feature = "ssr")]
pub async fn slide_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(index): axum::extract::Path<usize>,
    axum::extract::Query(query): axum::extract::Query<DocumentQuery>,
) -> Result<axum::Json<CurrentSlideResponse>, AppError> {
    let id = state.document_id(query.file.as_deref())?;
    let response = process_slide(state.source.as_ref(), &state.renderer, &id, index).await?;
    Ok(axum::Json(response))
}

/// Axum handler for `GET /api/v1/toc`.
#[cfg(feature = "ssr")]
pub async fn toc_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Query(query): axum::extract::Query<DocumentQuery>,
) -> Result<axum::Json<TocResponse>, AppError> {
    let id = state.document_id(query.file.as_deref())?;
    let response = process_toc(state.source.as_ref(), &state.renderer, &id).await?;
    Ok(axum::Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::client::MemoryDocumentSource;

    const GUIDE: &str = "# Guide\n\nIntro text.\n\n## Setup\n\nRun it.\n";

    fn id(raw: &str) -> DocumentId {
        DocumentId::parse(raw).unwrap()
    }

    fn source() -> MemoryDocumentSource {
        MemoryDocumentSource::new()
            .with_document(&id("guide.md"), GUIDE)
            .with_document(&id("plain.md"), "no headings here")
    }

    #[tokio::test]
    async fn test_document_rendered_with_toc() {
        let response = process_document(&source(), &Renderer::default(), &id("guide.md"))
            .await
            .unwrap();
        assert_eq!(response.file, "guide.md");
        assert!(response.html.contains("<h2 id=\"setup\">Setup</h2>"));
        let ids: Vec<_> = response.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["guide", "setup"]);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let result = process_document(&source(), &Renderer::default(), &id("nope.md")).await;
        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "File not found: nope.md"),
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slides_rendered_individually() {
        let response = process_slides(&source(), &Renderer::default(), &id("guide.md"), 100)
            .await
            .unwrap();
        assert_eq!(response.total, 2);
        assert_eq!(response.slides[1].title, "Setup");
        assert!(response.slides[1].html.contains("Run it."));
        assert!(!response.slides[1].html.contains("Intro text."));
        assert_eq!(response.overview.len(), 2);
        assert!(response.overview[0].active);
    }

    #[tokio::test]
    async fn test_single_slide_with_nav_state() {
        let response = process_slide(&source(), &Renderer::default(), &id("guide.md"), 1)
            .await
            .unwrap();
        assert_eq!(response.slide.title, "Setup");
        assert_eq!(response.nav.position, 2);
        assert!(!response.nav.next_enabled);

        let result = process_slide(&source(), &Renderer::default(), &id("guide.md"), 2).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_toc_empty_message() {
        let response = process_toc(&source(), &Renderer::default(), &id("plain.md"))
            .await
            .unwrap();
        assert!(response.entries.is_empty());
        assert_eq!(response.message.as_deref(), Some("No table of contents available."));
    }
}
