//! End-to-end behaviour of the views over the public library surface.

use folio::models::document::{Document, DocumentId};
use folio::rendering::text::Mark;
use folio::rendering::{Renderer, TextTree};
use folio::search::{apply_highlights, clear_highlights, search_page, SearchQuery};
use folio::slides::segment;
use folio::storage::client::FsDocumentSource;
use folio::storage::loader::load_content;
use folio::views::{PageView, SlideView};

#[test]
fn segmenting_three_headings() {
    let slides = segment("# A\nfoo\n# B\nbar\n# C\nbaz");
    let bodies: Vec<_> = slides
        .iter()
        .map(|s| s.content.lines().last().unwrap_or_default().to_string())
        .collect();
    assert_eq!(bodies, vec!["foo", "bar", "baz"]);
}

#[test]
fn document_without_headings_is_one_slide() {
    let slides = segment("plain text\nmore text");
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].raw_content, "plain text\nmore text");
}

#[test]
fn quick_brown_fox() {
    let matches = search_page("The quick brown fox", &SearchQuery::new("quick"), 50).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].position, 4);
    assert_eq!(matches[0].context, "The quick brown fox");
}

#[test]
fn highlight_then_clear_restores_text() {
    let html = Renderer::default().render(
        "# Title\n\nSome *emphasised* text with a [link](https://example.com).",
        &Default::default(),
    );
    let mut tree = TextTree::from_html(&html);
    let before = tree.to_html();
    let pattern = SearchQuery::new("t").compile().unwrap().unwrap();

    assert!(apply_highlights(&mut tree, &pattern) > 0);
    clear_highlights(&mut tree);
    assert_eq!(tree.to_html(), before);
    assert_eq!(tree.count_marked(Mark::Search), 0);
}

#[tokio::test]
async fn views_built_from_docs_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("talk.md"), "# One\nfirst\n## Two\nsecond").unwrap();
    let source = FsDocumentSource::new(dir.path());
    let renderer = Renderer::default();

    let id = DocumentId::parse("talk.md").unwrap();
    let content = load_content(&source, &id).await.unwrap();
    let mut deck = SlideView::from_document(&renderer, &Document::new(id.clone(), content));
    assert_eq!(deck.slides().len(), 2);
    deck.next();
    assert!(deck.render_current().contains("second"));

    let missing = DocumentId::parse("missing.md").unwrap();
    let page = PageView::from_load(&renderer, missing.clone(), load_content(&source, &missing).await);
    assert_eq!(page.load_error(), Some("File not found: missing.md"));
}
