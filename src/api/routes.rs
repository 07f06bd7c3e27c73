use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

use super::{documents, search, theme};

/// JSON API and stylesheet routes, without the Leptos pages.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/document", get(documents::document_handler))
        .route("/api/v1/slides", get(documents::slides_handler))
        .route("/api/v1/slides/{index}", get(documents::slide_handler))
        .route("/api/v1/toc", get(documents::toc_handler))
        .route("/api/v1/search", get(search::search_handler))
        .route("/api/v1/theme", post(theme::theme_handler))
        .route("/syntax.css", get(theme::syntax_css_handler))
}
