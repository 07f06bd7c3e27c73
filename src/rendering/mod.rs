//! Markdown to HTML conversion and the structures derived from its output.

pub mod capabilities;
pub mod links;
pub mod markdown;
pub mod syntax;
pub mod text;
pub mod toc;

pub use capabilities::Capabilities;
pub use markdown::{render_markdown, Renderer};
pub use text::TextTree;

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
