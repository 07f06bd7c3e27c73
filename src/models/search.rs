use serde::{Deserialize, Serialize};

/// A match found in the page view's rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// Ordinal of the match within the result set.
    pub index: usize,
    #[serde(rename = "match")]
    pub matched: String,
    /// Up to 50 characters either side of the match, clipped to the corpus.
    pub context: String,
    /// Character offset of the match start within the corpus.
    pub position: usize,
}

/// A match found in one slide's raw content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideMatch {
    pub slide_index: usize,
    pub slide_title: String,
    #[serde(rename = "match")]
    pub matched: String,
    pub context: String,
    /// Character offset of the match start within the slide's raw content.
    pub position: usize,
}

/// Common view of both match flavours, used by result list rendering.
pub trait MatchRecord {
    fn matched(&self) -> &str;
    fn context(&self) -> &str;
    fn position(&self) -> usize;

    /// Character offset of the match inside [`MatchRecord::context`].
    fn context_offset(&self, radius: usize) -> usize {
        self.position().min(radius)
    }

    /// Heading shown above the result preview, if any.
    fn label(&self) -> Option<String> {
        None
    }
}

impl MatchRecord for SearchMatch {
    fn matched(&self) -> &str {
        &self.matched
    }

    fn context(&self) -> &str {
        &self.context
    }

    fn position(&self) -> usize {
        self.position
    }
}

impl MatchRecord for SlideMatch {
    fn matched(&self) -> &str {
        &self.matched
    }

    fn context(&self) -> &str {
        &self.context
    }

    fn position(&self) -> usize {
        self.position
    }

    fn label(&self) -> Option<String> {
        Some(format!("Slide {}: {}", self.slide_index + 1, self.slide_title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_serializes_with_match_key() {
        let m = SearchMatch {
            index: 0,
            matched: "fox".into(),
            context: "the fox".into(),
            position: 4,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["match"], "fox");
        assert!(json.get("matched").is_none());
    }

    #[test]
    fn test_slide_label_is_one_based() {
        let m = SlideMatch {
            slide_index: 2,
            slide_title: "Setup".into(),
            matched: "x".into(),
            context: "x".into(),
            position: 0,
        };
        assert_eq!(m.label().as_deref(), Some("Slide 3: Setup"));
        assert_eq!(m.context_offset(50), 0);
    }
}
