//! What a view shows when its document cannot be loaded.

use crate::models::slide::Slide;
use crate::rendering::escape_html;

use super::ViewMode;

pub const SAMPLE_SLIDE_TITLE: &str = "Sample Slide";

/// Rendered below the error panel of the page view.
pub const PAGE_SAMPLE_MARKDOWN: &str = r#"# Welcome to Folio

This is **sample content** showing that the viewer works!

## Features
- Markdown rendering
- Code highlighting
- Math equations: $E = mc^2$
- And more!

```rust
fn main() {
    println!("Hello, World!");
}
```

> This is a blockquote to test styling.

### How to fix the file loading issue
1. Check that the file exists under the docs root
2. Check file permissions
3. Verify the `file` parameter
"#;

/// Content of the single slide shown after a failed load in slide view.
pub const SLIDE_SAMPLE_MARKDOWN: &str = r#"# Welcome to Slide Mode

This is **sample slide content**!

## Slide Features
- Slide-by-slide navigation
- Keyboard shortcuts
- Fullscreen support

### Navigation
- Use arrow keys to navigate
- Press F for fullscreen
- Press Ctrl+O for overview"#;

/// Inline error panel placed above the sample content.
pub fn error_panel_html(message: &str, mode: ViewMode) -> String {
    let sample_heading = match mode {
        ViewMode::Page => "Sample Content:",
        ViewMode::Slides => "Sample Slide Content:",
    };

    format!(
        r#"<div class="error">
<h2>File Loading Error</h2>
<p><strong>Error:</strong> {message}</p>
<h3>Possible Solutions:</h3>
<ul>
<li><strong>Check file path:</strong> the <code>file</code> parameter is resolved against the docs root</li>
<li><strong>Check permissions:</strong> the server must be able to read the file</li>
<li><strong>Check the extension:</strong> links between documents must point at <code>.md</code> files</li>
</ul>
<h3>{sample_heading}</h3>
</div>
"#,
        message = escape_html(message),
    )
}

/// The one-slide deck substituted for a document that failed to load.
pub fn sample_slides() -> Vec<Slide> {
    vec![Slide::new(
        SAMPLE_SLIDE_TITLE,
        SLIDE_SAMPLE_MARKDOWN,
        SLIDE_SAMPLE_MARKDOWN,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_panel_escapes_message() {
        let html = error_panel_html("File not found: <x>.md", ViewMode::Page);
        assert!(html.contains("File not found: &lt;x&gt;.md"));
        assert!(html.contains("Sample Content:"));
    }

    #[test]
    fn test_slide_panel_heading() {
        let html = error_panel_html("boom", ViewMode::Slides);
        assert!(html.contains("Sample Slide Content:"));
    }

    #[test]
    fn test_sample_deck_is_single_slide() {
        let slides = sample_slides();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, SAMPLE_SLIDE_TITLE);
        assert_eq!(slides[0].raw_content, SLIDE_SAMPLE_MARKDOWN);
    }
}
