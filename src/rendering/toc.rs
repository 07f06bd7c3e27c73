use serde::{Deserialize, Serialize};

use super::text::{Node, TextTree};

/// Message shown in place of the list when a document has no headings.
pub const EMPTY_TOC_MESSAGE: &str = "No table of contents available.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    /// Fragment the entry scrolls to.
    pub id: String,
}

struct OpenHeading {
    level: u8,
    id: String,
    text: String,
}

/// Collect the headings of a rendered document in order.
///
/// A heading without an `id` (or with an empty one) gets `heading-{index}`,
/// where `index` is its ordinal among all headings, and the markup in
/// `tree` is updated so the fragment resolves.
pub fn build_toc(tree: &mut TextTree) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut open: Option<OpenHeading> = None;

    for node in tree.nodes_mut() {
        match node {
            Node::Text(leaf) => {
                if let Some(heading) = open.as_mut() {
                    heading.text.push_str(&leaf.text());
                }
            }
            Node::Close(name) => {
                if let Some(heading) = open.take_if(|h| heading_level(name) == Some(h.level)) {
                    entries.push(TocEntry {
                        level: heading.level,
                        text: heading.text,
                        id: heading.id,
                    });
                }
            }
            Node::Open(tag) if open.is_none() => {
                let Some(level) = heading_level(tag.name()) else {
                    continue;
                };
                let id = match tag.attr("id") {
                    Some(existing) if !existing.is_empty() => existing.to_string(),
                    _ => {
                        let id = format!("heading-{}", entries.len());
                        tag.set_attr("id", id.as_str());
                        id
                    }
                };
                open = Some(OpenHeading {
                    level,
                    id,
                    text: String::new(),
                });
            }
            Node::Open(_) | Node::Markup(_) => {}
        }
    }

    entries
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::markdown::render_markdown;

    fn toc_for(markdown: &str) -> (Vec<TocEntry>, TextTree) {
        let mut tree = TextTree::from_html(&render_markdown(markdown));
        let toc = build_toc(&mut tree);
        (toc, tree)
    }

    #[test]
    fn test_entries_in_document_order() {
        let (toc, _) = toc_for("# Intro\n\ntext\n\n## Setup\n\n### Details\n");
        let summary: Vec<_> = toc
            .iter()
            .map(|e| (e.level, e.text.as_str(), e.id.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "Intro", "intro"),
                (2, "Setup", "setup"),
                (3, "Details", "details"),
            ]
        );
    }

    #[test]
    fn test_inline_markup_in_heading_text() {
        let (toc, _) = toc_for("## Using `cargo` *well*");
        assert_eq!(toc[0].text, "Using cargo well");
        assert_eq!(toc[0].id, "using-cargo-well");
    }

    #[test]
    fn test_missing_id_gets_positional_fallback() {
        let (toc, tree) = toc_for("# First\n\n# ???\n");
        assert_eq!(toc[1].id, "heading-1");
        assert!(tree.to_html().contains("<h1 id=\"heading-1\">???</h1>"));
    }

    #[test]
    fn test_no_headings() {
        let (toc, _) = toc_for("just a paragraph");
        assert!(toc.is_empty());
    }

    #[test]
    fn test_raw_html_heading_attributes() {
        let (toc, tree) = toc_for(
            "<h2 title=\"a > b\" id=\"raw\">Raw &amp; ready</h2>\n\n<h3 id=\"\" class=\"x\">Blank</h3>\n",
        );
        let summary: Vec<_> = toc
            .iter()
            .map(|e| (e.level, e.text.as_str(), e.id.as_str()))
            .collect();
        assert_eq!(summary, vec![(2, "Raw & ready", "raw"), (3, "Blank", "heading-1")]);
        assert!(tree
            .to_html()
            .contains("<h3 id=\"heading-1\" class=\"x\">Blank</h3>"));
    }
}
