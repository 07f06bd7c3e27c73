//! Optional rendering capabilities supplied by the host at construction time.
//!
//! Each capability is an `Option<Arc<dyn _>>`; `None` is the "absent"
//! sentinel and makes the renderer degrade silently (plain code blocks, no
//! diagrams, literal math).

use std::sync::Arc;

use crate::config::RenderConfig;
use crate::rendering::escape_html;

/// Produces highlighted HTML for the body of a code block.
pub trait CodeHighlighter: Send + Sync {
    /// Highlight `code` written in `language` (or detect it when `None`).
    ///
    /// Returns `None` when the language is unknown or highlighting failed;
    /// the caller then falls back to escaped plain text.
    fn highlight(&self, code: &str, language: Option<&str>) -> Option<String>;
}

/// Turns a diagram code block into a placeholder the client-side renderer
/// picks up after the HTML is inserted.
pub trait DiagramRenderer: Send + Sync {
    /// Code block language tag this renderer claims.
    fn language(&self) -> &str;

    fn render(&self, source: &str) -> String;
}

/// Emits markup for TeX math that a client-side typesetter processes.
pub trait MathTypesetter: Send + Sync {
    fn inline(&self, tex: &str) -> String;

    fn display(&self, tex: &str) -> String;
}

/// The set of optional capabilities available to a renderer.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub highlighter: Option<Arc<dyn CodeHighlighter>>,
    pub diagrams: Option<Arc<dyn DiagramRenderer>>,
    pub math: Option<Arc<dyn MathTypesetter>>,
}

impl Capabilities {
    /// No optional capability at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Capabilities enabled by the render configuration and crate features.
    pub fn from_config(config: &RenderConfig) -> Self {
        let mut capabilities = Self::none();

        if config.syntax_highlighting {
            capabilities.highlighter = Some(Arc::new(super::syntax::SyntectHighlighter::new()));
        }
        if cfg!(feature = "mermaid") && config.mermaid {
            capabilities.diagrams = Some(Arc::new(MermaidPlaceholder));
        }
        if cfg!(feature = "math") && config.math {
            capabilities.math = Some(Arc::new(MathJaxMarkup));
        }

        tracing::debug!(
            highlighter = capabilities.highlighter.is_some(),
            diagrams = capabilities.diagrams.is_some(),
            math = capabilities.math.is_some(),
            "rendering capabilities resolved"
        );
        capabilities
    }

    pub fn with_highlighter(mut self, highlighter: Arc<dyn CodeHighlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn with_diagrams(mut self, diagrams: Arc<dyn DiagramRenderer>) -> Self {
        self.diagrams = Some(diagrams);
        self
    }

    pub fn with_math(mut self, math: Arc<dyn MathTypesetter>) -> Self {
        self.math = Some(math);
        self
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("highlighter", &self.highlighter.is_some())
            .field("diagrams", &self.diagrams.is_some())
            .field("math", &self.math.is_some())
            .finish()
    }
}

/// `<div class="mermaid">` placeholder consumed by mermaid.js.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidPlaceholder;

impl DiagramRenderer for MermaidPlaceholder {
    fn language(&self) -> &str {
        "mermaid"
    }

    fn render(&self, source: &str) -> String {
        format!("<div class=\"mermaid\">{}</div>\n", escape_html(source))
    }
}

/// MathJax-style `\( \)` / `\[ \]` delimiters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathJaxMarkup;

impl MathTypesetter for MathJaxMarkup {
    fn inline(&self, tex: &str) -> String {
        format!(
            "<span class=\"math math-inline\">\\({}\\)</span>",
            escape_html(tex)
        )
    }

    fn display(&self, tex: &str) -> String {
        format!(
            "<span class=\"math math-display\">\\[{}\\]</span>",
            escape_html(tex)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mermaid_placeholder_escapes_source() {
        let html = MermaidPlaceholder.render("graph TD\nA-->B");
        assert_eq!(html, "<div class=\"mermaid\">graph TD\nA--&gt;B</div>\n");
    }

    #[test]
    fn test_mathjax_delimiters() {
        assert_eq!(
            MathJaxMarkup.inline("a<b"),
            "<span class=\"math math-inline\">\\(a&lt;b\\)</span>"
        );
        assert!(MathJaxMarkup.display("x^2").contains("\\[x^2\\]"));
    }

    #[test]
    fn test_from_config_respects_switches() {
        let config = RenderConfig {
            syntax_highlighting: false,
            mermaid: false,
            math: false,
            ..RenderConfig::default()
        };
        let caps = Capabilities::from_config(&config);
        assert!(caps.highlighter.is_none());
        assert!(caps.diagrams.is_none());
        assert!(caps.math.is_none());
    }

    #[test]
    fn test_from_config_defaults() {
        let caps = Capabilities::from_config(&RenderConfig::default());
        assert!(caps.highlighter.is_some());
        assert_eq!(caps.diagrams.is_some(), cfg!(feature = "mermaid"));
        assert_eq!(caps.math.is_some(), cfg!(feature = "math"));
    }
}
