//! Marking search results inside a [`TextTree`] and undoing the marks.

use crate::rendering::text::{Mark, TextTree};

use super::pattern::SearchPattern;

/// Mark every match of `pattern` in every leaf, after clearing any previous
/// highlight. Returns the number of marked matches.
///
/// Matching runs per leaf, so a match would have to lie within a single
/// leaf to be highlighted in bulk.
pub fn apply_highlights(tree: &mut TextTree, pattern: &SearchPattern) -> usize {
    clear_highlights(tree);

    let mut marked = 0;
    for leaf in tree.leaves_mut() {
        let text = leaf.text();
        for found in pattern.find_all(&text) {
            leaf.mark_range(found.start, found.end, Mark::Search);
            marked += 1;
        }
    }
    marked
}

/// Remove every mark and merge split runs back into one plain run per leaf.
/// Idempotent.
pub fn clear_highlights(tree: &mut TextTree) {
    for leaf in tree.leaves_mut() {
        leaf.clear(None);
    }
}

/// Remove only the point highlight left by [`jump_to`].
pub fn clear_current(tree: &mut TextTree) {
    for leaf in tree.leaves_mut() {
        if leaf.has_mark(Mark::Current) {
            leaf.clear(Some(Mark::Current));
        }
    }
}

/// Point-highlight `len` characters starting at character `position` of the
/// tree's text content.
///
/// The previous point highlight is removed first. The starting leaf is the
/// first one whose cumulative length exceeds `position`; a match running
/// past its end continues into the following leaves. Returns the ordinal of
/// the starting leaf, or `None` when `position` lies beyond the text or
/// `len` is zero.
pub fn jump_to(tree: &mut TextTree, position: usize, len: usize) -> Option<usize> {
    clear_current(tree);
    if len == 0 {
        return None;
    }

    let mut anchor = None;
    let mut offset = 0;
    let mut remaining = len;

    for (ordinal, leaf) in tree.leaves_mut().enumerate() {
        let leaf_len = leaf.char_len();
        match anchor {
            None if offset + leaf_len > position => {
                let start = position - offset;
                let end = (start + remaining).min(leaf_len);
                leaf.mark_range(start, end, Mark::Current);
                remaining -= end - start;
                anchor = Some(ordinal);
            }
            None => {}
            Some(_) => {
                let end = remaining.min(leaf_len);
                leaf.mark_range(0, end, Mark::Current);
                remaining -= end;
            }
        }
        offset += leaf_len;

        if anchor.is_some() && remaining == 0 {
            break;
        }
    }

    if anchor.is_none() {
        tracing::debug!(position, len, "jump target beyond text content");
    }
    anchor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::pattern::SearchQuery;

    const HTML: &str = "<h1 id=\"intro\">Intro</h1>\n<p>The quick brown fox, the <em>quick</em> dog.</p>\n";

    fn pattern(text: &str) -> SearchPattern {
        SearchQuery::new(text).compile().unwrap().unwrap()
    }

    #[test]
    fn test_apply_preserves_text() {
        let mut tree = TextTree::from_html(HTML);
        let before = tree.text_content();
        let marked = apply_highlights(&mut tree, &pattern("quick"));
        assert_eq!(marked, 2);
        assert_eq!(tree.text_content(), before);
        assert_eq!(tree.count_marked(Mark::Search), 2);
    }

    #[test]
    fn test_clear_restores_tree_exactly() {
        let original = TextTree::from_html(HTML);
        let mut tree = original.clone();
        apply_highlights(&mut tree, &pattern("the"));
        assert!(tree.count_marked(Mark::Search) > 0);
        clear_highlights(&mut tree);
        assert_eq!(tree, original);
        assert_eq!(tree.to_html(), original.to_html());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut tree = TextTree::from_html(HTML);
        apply_highlights(&mut tree, &pattern("o"));
        clear_highlights(&mut tree);
        let once = tree.clone();
        clear_highlights(&mut tree);
        assert_eq!(tree, once);
    }

    #[test]
    fn test_reapply_replaces_previous_marks() {
        let mut tree = TextTree::from_html(HTML);
        apply_highlights(&mut tree, &pattern("quick"));
        apply_highlights(&mut tree, &pattern("fox"));
        assert_eq!(tree.count_marked(Mark::Search), 1);
        assert!(tree.to_html().contains("<span class=\"search-highlight\">fox</span>"));
    }

    #[test]
    fn test_adjacent_matches_stay_separate() {
        let mut tree = TextTree::from_html("<p>aaa</p>");
        assert_eq!(apply_highlights(&mut tree, &pattern("a")), 3);
        assert_eq!(tree.count_marked(Mark::Search), 3);
    }

    #[test]
    fn test_jump_to_marks_current() {
        let mut tree = TextTree::from_html(HTML);
        let text = tree.text_content();
        let position = text.find("brown").unwrap();
        let leaf = jump_to(&mut tree, position, 5);
        assert_eq!(leaf, Some(2));
        assert!(tree
            .to_html()
            .contains("<span class=\"highlight\" id=\"current-match\">brown</span>"));
    }

    #[test]
    fn test_jump_clears_previous_current() {
        let mut tree = TextTree::from_html(HTML);
        jump_to(&mut tree, 0, 5);
        jump_to(&mut tree, 10, 5);
        assert_eq!(tree.count_marked(Mark::Current), 1);
    }

    #[test]
    fn test_jump_spanning_leaves() {
        let mut tree = TextTree::from_html("<p>ab<em>cd</em>ef</p>");
        assert_eq!(jump_to(&mut tree, 1, 4), Some(0));
        assert_eq!(
            tree.to_html(),
            "<p>a<span class=\"highlight\" id=\"current-match\">b</span><em>\
             <span class=\"highlight\" id=\"current-match\">cd</span></em>\
             <span class=\"highlight\" id=\"current-match\">e</span>f</p>"
        );
    }

    #[test]
    fn test_jump_beyond_text() {
        let mut tree = TextTree::from_html("<p>short</p>");
        assert_eq!(jump_to(&mut tree, 99, 1), None);
        assert_eq!(jump_to(&mut tree, 0, 0), None);
        assert_eq!(tree.count_marked(Mark::Current), 0);
    }

    #[test]
    fn test_jump_over_bulk_highlight_then_clear() {
        let original = TextTree::from_html(HTML);
        let mut tree = original.clone();
        apply_highlights(&mut tree, &pattern("quick"));
        let position = tree.text_content().find("quick").unwrap();
        jump_to(&mut tree, position, 5);
        assert_eq!(tree.count_marked(Mark::Current), 1);
        assert_eq!(tree.count_marked(Mark::Search), 1);
        clear_highlights(&mut tree);
        assert_eq!(tree, original);
    }
}
