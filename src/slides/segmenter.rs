use std::sync::LazyLock;

use regex::Regex;

use crate::models::slide::Slide;

/// Title of the single slide produced for documents without level-1/2 headings.
pub const COMPLETE_DOCUMENT_TITLE: &str = "Complete Document";
/// Title of the placeholder slide produced for empty documents.
pub const EMPTY_DOCUMENT_TITLE: &str = "Empty Document";
const EMPTY_DOCUMENT_BODY: &str = "No content available.";

/// A line opening with exactly one or two `#` followed by horizontal whitespace.
static HEADING_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,2}[ \t]+").expect("heading boundary pattern is valid"));

/// Split a markdown document into slides at level-1 and level-2 headings.
///
/// Text before the first heading is dropped. The result is never empty:
/// a document without qualifying headings becomes one verbatim slide, and an
/// empty document becomes a placeholder slide.
pub fn segment(document: &str) -> Vec<Slide> {
    if document.trim().is_empty() {
        return vec![empty_document_slide()];
    }

    let boundaries: Vec<_> = HEADING_BOUNDARY.find_iter(document).collect();
    if boundaries.is_empty() {
        return vec![Slide::new(COMPLETE_DOCUMENT_TITLE, document, document)];
    }

    boundaries
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = boundaries
                .get(i + 1)
                .map(|next| next.start())
                .unwrap_or(document.len());
            slide_from_segment(&document[marker.end()..end])
        })
        .collect()
}

/// Build a slide from the text between a heading marker and the next boundary.
fn slide_from_segment(raw: &str) -> Slide {
    let trimmed = raw.trim();
    let (first_line, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));

    let title = first_line
        .trim_start_matches(|c: char| c == '#' || c.is_whitespace())
        .trim_end();
    let body = rest.trim();

    Slide::new(title, format!("# {title}\n\n{body}"), raw)
}

fn empty_document_slide() -> Slide {
    Slide::new(
        EMPTY_DOCUMENT_TITLE,
        format!("# {EMPTY_DOCUMENT_TITLE}\n\n{EMPTY_DOCUMENT_BODY}"),
        EMPTY_DOCUMENT_BODY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_headings() {
        let slides = segment("# A\nfoo\n# B\nbar\n# C\nbaz");
        let titles: Vec<_> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(slides[0].content, "# A\n\nfoo");
        assert_eq!(slides[1].content, "# B\n\nbar");
        assert_eq!(slides[2].content, "# C\n\nbaz");
    }

    #[test]
    fn test_raw_content_is_verbatim_segment() {
        let slides = segment("# A\nfoo\n\n## B\n  bar  \n");
        assert_eq!(slides[0].raw_content, "A\nfoo\n\n");
        assert_eq!(slides[1].raw_content, "B\n  bar  \n");
        assert_eq!(slides[1].content, "# B\n\nbar");
    }

    #[test]
    fn test_level_two_is_a_boundary_level_three_is_not() {
        let doc = "# Intro\ntext\n## Details\nmore\n### Deep\ndeeper\n";
        let slides = segment(doc);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].title, "Details");
        assert!(slides[1].content.contains("### Deep"));
    }

    #[test]
    fn test_heading_count_matches_slide_count() {
        let doc = "# One\n\n## Two\n\n# Three\n\n## Four\n";
        let slides = segment(doc);
        assert_eq!(slides.len(), 4);
        assert_eq!(slides[3].title, "Four");
        assert_eq!(slides[3].content, "# Four\n\n");
    }

    #[test]
    fn test_preamble_is_dropped() {
        let slides = segment("preamble text\n\n# First\nbody");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "First");
        assert!(!slides[0].raw_content.contains("preamble"));
    }

    #[test]
    fn test_no_headings_yields_whole_document() {
        let doc = "just some text\n\n### small heading\nmore";
        let slides = segment(doc);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, COMPLETE_DOCUMENT_TITLE);
        assert_eq!(slides[0].raw_content, doc);
        assert_eq!(slides[0].content, doc);
    }

    #[test]
    fn test_empty_document_placeholder() {
        for doc in ["", "   \n\t\n"] {
            let slides = segment(doc);
            assert_eq!(slides.len(), 1);
            assert_eq!(slides[0].title, EMPTY_DOCUMENT_TITLE);
            assert_eq!(slides[0].content, "# Empty Document\n\nNo content available.");
            assert_eq!(slides[0].raw_content, "No content available.");
        }
    }

    #[test]
    fn test_marker_needs_whitespace() {
        let slides = segment("#hashtag\n# Real\nbody");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Real");
    }

    #[test]
    fn test_bare_hash_line_is_not_a_boundary() {
        let slides = segment("# A\nfoo\n#\nbar\n##\n# B\nbaz");
        let titles: Vec<_> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert!(slides[0].raw_content.contains("#\nbar\n##"));
    }

    #[test]
    fn test_heading_not_at_line_start_ignored() {
        let slides = segment("# Top\nsee C# notes and a # sign\n");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Top");
    }

    #[test]
    fn test_title_keeps_inner_hashes() {
        let slides = segment("# C# tips\nbody");
        assert_eq!(slides[0].title, "C# tips");
    }

    #[test]
    fn test_crlf_line_endings() {
        let slides = segment("# A\r\nfoo\r\n# B\r\nbar");
        assert_eq!(slides[0].title, "A");
        assert_eq!(slides[1].title, "B");
    }
}
