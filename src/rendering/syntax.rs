//! Code block highlighting backed by syntect's bundled grammars.

use std::sync::LazyLock;

use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::capabilities::CodeHighlighter;
use crate::error::AppError;

/// Prefix of every class emitted by the highlighter and the stylesheet.
pub const CSS_PREFIX: &str = "hl-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: CSS_PREFIX };

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Class-based highlighter; colours come from [`theme_css`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self
    }

    fn find_syntax(code: &str, language: Option<&str>) -> Option<&'static SyntaxReference> {
        match language {
            Some(token) => SYNTAX_SET.find_syntax_by_token(token),
            None => code
                .lines()
                .next()
                .and_then(|first| SYNTAX_SET.find_syntax_by_first_line(first)),
        }
    }
}

impl CodeHighlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Option<String> {
        let syntax = Self::find_syntax(code, language)?;
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::warn!(language = ?language, error = %e, "syntax highlighting failed");
                return None;
            }
        }
        Some(generator.finalize())
    }
}

/// Names of the bundled code themes.
pub fn theme_names() -> Vec<&'static str> {
    THEME_SET.themes.keys().map(String::as_str).collect()
}

/// Stylesheet for the highlighter classes under the named code theme.
pub fn theme_css(name: &str) -> Result<String, AppError> {
    let theme = THEME_SET
        .themes
        .get(name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown code theme: {name}")))?;

    css_for_theme_with_class_style(theme, CLASS_STYLE)
        .map_err(|e| AppError::Internal(format!("Failed to build code theme CSS: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlights_known_language() {
        let html = SyntectHighlighter::new()
            .highlight("fn main() {}\n", Some("rust"))
            .expect("rust is bundled");
        assert!(html.contains("hl-"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_is_none() {
        assert!(SyntectHighlighter::new()
            .highlight("whatever", Some("no-such-language"))
            .is_none());
    }

    #[test]
    fn test_highlight_escapes_markup() {
        let html = SyntectHighlighter::new()
            .highlight("<div>\n", Some("html"))
            .unwrap();
        assert!(html.contains("&lt;"));
        assert!(!html.contains("<div>"));
    }

    #[test]
    fn test_theme_css() {
        let css = theme_css("InspiredGitHub").unwrap();
        assert!(css.contains(".hl-"));
        assert!(matches!(theme_css("nope"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_theme_names_include_defaults() {
        let names = theme_names();
        assert!(names.contains(&"base16-ocean.dark"));
        assert!(names.contains(&"InspiredGitHub"));
    }
}
