use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::error::AppError;
use crate::rendering::syntax::theme_css;
use crate::theme::{is_valid_theme, mermaid_theme, theme_class};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: String,
    pub class: String,
    pub mermaid_theme: String,
}

/// Validate a theme preference before it is stored.
pub fn process_theme(request: ThemeRequest) -> Result<ThemeResponse, AppError> {
    let theme = request.theme.trim().to_string();
    if !is_valid_theme(&theme) {
        return Err(AppError::BadRequest(format!(
            "Invalid theme name '{}'. Use letters, digits, '-' or '_'",
            request.theme
        )));
    }

    Ok(ThemeResponse {
        class: theme_class(&theme),
        mermaid_theme: mermaid_theme(&theme).to_string(),
        theme,
    })
}

/// Code-highlighting stylesheet for the reader theme `theme`.
pub fn process_syntax_css(render: &RenderConfig, theme: &str) -> Result<String, AppError> {
    theme_css(render.code_theme_for(theme))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyntaxCssQuery {
    pub theme: Option<String>,
}

/// `POST /api/v1/theme`: stores the preference in the theme cookie.
#[cfg(feature = "ssr")]
pub async fn theme_handler(
    jar: axum_extra::extract::CookieJar,
    axum::Json(request): axum::Json<ThemeRequest>,
) -> Result<(axum_extra::extract::CookieJar, axum::Json<ThemeResponse>), AppError> {
    let response = process_theme(request)?;

    let cookie = axum_extra::extract::cookie::Cookie::build((
        crate::theme::THEME_COOKIE,
        response.theme.clone(),
    ))
    .path("/")
    .same_site(axum_extra::extract::cookie::SameSite::Lax)
    .permanent()
    .build();

    tracing::debug!(theme = %response.theme, "theme preference stored");
    Ok((jar.add(cookie), axum::Json(response)))
}

/// `GET /syntax.css`: highlighting colours for the requested or stored theme.
#[cfg(feature = "ssr")]
pub async fn syntax_css_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    axum::extract::Query(query): axum::extract::Query<SyntaxCssQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let theme = crate::theme::resolve_theme(
        query.theme.as_deref(),
        jar.get(crate::theme::THEME_COOKIE).map(|c| c.value()),
        &state.config.view.default_theme,
    );
    let css = process_syntax_css(&state.config.render, &theme)?;

    Ok((
        [(axum::http::header::CONTENT_TYPE, "text/css; charset=utf-8")],
        css,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_accepted() {
        let response = process_theme(ThemeRequest {
            theme: " dark ".into(),
        })
        .unwrap();
        assert_eq!(response.theme, "dark");
        assert_eq!(response.class, "theme-dark");
        assert_eq!(response.mermaid_theme, "dark");
    }

    #[test]
    fn test_custom_theme_passes_through() {
        let response = process_theme(ThemeRequest {
            theme: "solarized".into(),
        })
        .unwrap();
        assert_eq!(response.class, "theme-solarized");
        assert_eq!(response.mermaid_theme, "default");
    }

    #[test]
    fn test_invalid_theme_rejected() {
        let result = process_theme(ThemeRequest {
            theme: "<script>".into(),
        });
        match result {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("Invalid theme name")),
            other => panic!("Expected BadRequest error, got: {:?}", other),
        }
    }

    #[test]
    fn test_syntax_css_follows_theme() {
        let render = RenderConfig::default();
        let light = process_syntax_css(&render, "light").unwrap();
        let dark = process_syntax_css(&render, "dark").unwrap();
        assert!(light.contains(".hl-"));
        assert_ne!(light, dark);
    }

    #[test]
    fn test_unknown_code_theme_is_not_found() {
        let render = RenderConfig {
            light_code_theme: "Nope".into(),
            ..RenderConfig::default()
        };
        assert!(matches!(
            process_syntax_css(&render, "light"),
            Err(AppError::NotFound(_))
        ));
    }
}
