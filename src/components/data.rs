use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::slide::Slide;

/// Theme and document information shared by both views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewShell {
    pub file: String,
    pub theme: String,
    pub themes: Vec<String>,
    pub context_radius: usize,
}

/// Server-rendered page content; the browser builds its `PageView` from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub shell: ViewShell,
    pub content_html: String,
    pub error: Option<String>,
}

/// A segmented deck with every slide pre-rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckData {
    pub shell: ViewShell,
    pub slides: Vec<Slide>,
    pub rendered: Vec<String>,
    pub error: Option<String>,
    pub preview_length: usize,
}

#[cfg(feature = "ssr")]
async fn view_shell(
    state: &crate::state::AppState,
    file: &str,
    theme: Option<String>,
) -> Result<ViewShell, ServerFnError> {
    let jar: axum_extra::extract::CookieJar = leptos_axum::extract().await?;
    let theme = crate::theme::resolve_theme(
        theme.as_deref(),
        jar.get(crate::theme::THEME_COOKIE).map(|c| c.value()),
        &state.config.view.default_theme,
    );

    Ok(ViewShell {
        file: file.to_string(),
        theme,
        themes: state.config.view.themes.clone(),
        context_radius: state.config.view.context_radius,
    })
}

/// Resolve and fetch the requested document. An unusable `file` parameter
/// is reported like any other load failure.
#[cfg(feature = "ssr")]
async fn load_requested(
    state: &crate::state::AppState,
    file: Option<&str>,
) -> Result<
    (
        crate::models::document::DocumentId,
        Result<String, crate::error::AppError>,
    ),
    crate::error::AppError,
> {
    let id = state.document_id(file)?;
    let loaded = crate::storage::loader::load_content(state.source.as_ref(), &id).await;
    Ok((id, loaded))
}

#[server]
pub async fn load_page(
    file: Option<String>,
    theme: Option<String>,
) -> Result<PageData, ServerFnError> {
    use crate::state::AppState;
    use crate::views::PageView;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    let view = match load_requested(&state, file.as_deref()).await {
        Ok((id, loaded)) => PageView::from_load(&state.renderer, id, loaded),
        Err(e) => PageView::from_load_error(&state.renderer, None, &e.to_string()),
    };
    let file = view
        .document()
        .map(ToString::to_string)
        .unwrap_or_else(|| file.unwrap_or_default());

    Ok(PageData {
        shell: view_shell(&state, &file, theme).await?,
        content_html: view.content_html(),
        error: view.load_error().map(str::to_string),
    })
}

#[server]
pub async fn load_deck(
    file: Option<String>,
    theme: Option<String>,
) -> Result<DeckData, ServerFnError> {
    use crate::state::AppState;
    use crate::views::SlideView;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    let view = match load_requested(&state, file.as_deref()).await {
        Ok((id, loaded)) => SlideView::from_load(&state.renderer, id, loaded),
        Err(e) => SlideView::from_load_error(&state.renderer, None, &e.to_string()),
    };
    let file = view
        .document()
        .map(ToString::to_string)
        .unwrap_or_else(|| file.unwrap_or_default());

    Ok(DeckData {
        shell: view_shell(&state, &file, theme).await?,
        slides: view.slides().to_vec(),
        rendered: view.render_all(),
        error: view.load_error().map(str::to_string),
        preview_length: state.config.view.preview_length,
    })
}

/// Persist the reader's theme choice in the theme cookie.
#[server]
pub async fn save_theme_preference(theme: String) -> Result<String, ServerFnError> {
    use crate::api::theme::{process_theme, ThemeRequest};
    use axum_extra::extract::cookie::{Cookie, SameSite};

    let response =
        process_theme(ThemeRequest { theme }).map_err(|e| ServerFnError::new(e.to_string()))?;
    let cookie = Cookie::build((crate::theme::THEME_COOKIE, response.theme.clone()))
        .path("/")
        .same_site(SameSite::Lax)
        .permanent()
        .build();

    let options = use_context::<leptos_axum::ResponseOptions>()
        .ok_or_else(|| ServerFnError::new("ResponseOptions not found in context"))?;
    let value = axum::http::HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| ServerFnError::new(format!("Invalid cookie: {e}")))?;
    options.append_header(axum::http::header::SET_COOKIE, value);

    Ok(response.theme)
}
