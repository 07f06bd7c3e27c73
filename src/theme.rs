//! Reader theme selection.
//!
//! Themes form an open set: any name is applied as the body class
//! `theme-{name}`, and the stylesheet decides what it looks like.

/// Cookie holding the persisted theme preference.
pub const THEME_COOKIE: &str = "folio_theme";

pub const DEFAULT_THEME: &str = "light";

/// Pick the active theme: the `theme` query parameter, then the stored
/// preference, then the configured default. Blank values are skipped.
pub fn resolve_theme(query: Option<&str>, stored: Option<&str>, default: &str) -> String {
    [query, stored]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or(default)
        .to_string()
}

pub fn theme_class(theme: &str) -> String {
    format!("theme-{theme}")
}

pub fn is_dark(theme: &str) -> bool {
    theme == "dark" || theme.ends_with("-dark")
}

/// Theme name handed to the diagram renderer.
pub fn mermaid_theme(theme: &str) -> &'static str {
    if is_dark(theme) {
        "dark"
    } else {
        "default"
    }
}

/// A theme name safe to put in a class attribute and a cookie.
pub fn is_valid_theme(theme: &str) -> bool {
    !theme.is_empty()
        && theme.len() <= 64
        && theme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_wins() {
        assert_eq!(resolve_theme(Some("dark"), Some("sepia"), "light"), "dark");
    }

    #[test]
    fn test_stored_preference_used_without_query() {
        assert_eq!(resolve_theme(None, Some("sepia"), "light"), "sepia");
        assert_eq!(resolve_theme(Some("  "), Some("sepia"), "light"), "sepia");
    }

    #[test]
    fn test_falls_back_to_default() {
        assert_eq!(resolve_theme(None, None, DEFAULT_THEME), "light");
    }

    #[test]
    fn test_unknown_theme_passes_through() {
        assert_eq!(resolve_theme(Some("solarized"), None, "light"), "solarized");
        assert_eq!(theme_class("solarized"), "theme-solarized");
    }

    #[test]
    fn test_mermaid_theme() {
        assert_eq!(mermaid_theme("dark"), "dark");
        assert_eq!(mermaid_theme("nord-dark"), "dark");
        assert_eq!(mermaid_theme("light"), "default");
        assert_eq!(mermaid_theme("sepia"), "default");
    }

    #[test]
    fn test_theme_validation() {
        assert!(is_valid_theme("high-contrast"));
        assert!(!is_valid_theme(""));
        assert!(!is_valid_theme("x\" onload=\""));
    }
}
