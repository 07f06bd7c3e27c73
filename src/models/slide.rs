use serde::{Deserialize, Serialize};

/// One segment of a document presented as a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Heading text of the segment, or a fixed placeholder for synthetic slides.
    pub title: String,
    /// Markdown used for rendering: a normalized `#` heading followed by the body.
    pub content: String,
    /// Verbatim segment text, used as the search corpus.
    pub raw_content: String,
}

impl Slide {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        raw_content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            raw_content: raw_content.into(),
        }
    }
}
