use crate::models::document::DocumentId;
use crate::views::ViewMode;

/// Where rendered links are resolved from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkContext {
    /// View the rewritten links open in.
    pub mode: ViewMode,
    /// Document being rendered; relative links resolve against its directory.
    pub current: Option<DocumentId>,
}

impl LinkContext {
    pub fn new(mode: ViewMode, current: Option<DocumentId>) -> Self {
        Self { mode, current }
    }
}

/// Rewrite a link to another markdown document into a view URL.
///
/// Returns `None` when the link must be left untouched: external URLs,
/// anchors, `mailto:` links, non-markdown targets and paths escaping the
/// docs root.
pub fn rewrite_document_link(url: &str, ctx: &LinkContext) -> Option<String> {
    if !is_internal_link(url) {
        return None;
    }

    let (path, fragment) = match url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (url, None),
    };
    if path.contains('?') || !path.to_ascii_lowercase().ends_with(".md") {
        return None;
    }

    let resolved = resolve_path(path, ctx.current.as_ref())?;
    let id = DocumentId::parse(&resolved).ok()?;

    let mut view_url = format!(
        "{}?file={}",
        ctx.mode.route(),
        urlencoding::encode(id.as_str())
    );
    if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
        view_url.push('#');
        view_url.push_str(fragment);
    }
    Some(view_url)
}

/// Determine if a link points at a document served by this viewer.
///
/// External links (`http://`, `https://`, any other scheme), anchors
/// (`#heading`), and mailto links are excluded.
fn is_internal_link(url: &str) -> bool {
    !url.is_empty()
        && !url.starts_with("http://")
        && !url.starts_with("https://")
        && !url.starts_with("//")
        && !url.starts_with('#')
        && !url.starts_with("mailto:")
        && !has_scheme(url)
}

fn has_scheme(url: &str) -> bool {
    match url.find(':') {
        Some(colon) => url[..colon]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        None => false,
    }
}

/// Join `path` onto the current document's directory, folding `.` and `..`.
fn resolve_path(path: &str, current: Option<&DocumentId>) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    let relative = match path.strip_prefix('/') {
        Some(rooted) => rooted,
        None => {
            if let Some(current) = current {
                parts.extend(current.parent().split('/').filter(|p| !p.is_empty()));
            }
            path
        }
    };

    for part in relative.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: ViewMode, current: &str) -> LinkContext {
        LinkContext::new(mode, Some(DocumentId::parse(current).unwrap()))
    }

    #[test]
    fn test_sibling_link_in_page_view() {
        let url = rewrite_document_link("setup.md", &ctx(ViewMode::Page, "index.md"));
        assert_eq!(url.as_deref(), Some("/?file=setup.md"));
    }

    #[test]
    fn test_link_keeps_mode_and_fragment() {
        let url = rewrite_document_link("setup.md#install", &ctx(ViewMode::Slides, "index.md"));
        assert_eq!(url.as_deref(), Some("/slides?file=setup.md#install"));
    }

    #[test]
    fn test_resolves_against_current_directory() {
        let url = rewrite_document_link("../api/auth.md", &ctx(ViewMode::Page, "guide/intro.md"));
        assert_eq!(url.as_deref(), Some("/?file=api%2Fauth.md"));

        let url = rewrite_document_link("./next.md", &ctx(ViewMode::Page, "guide/intro.md"));
        assert_eq!(url.as_deref(), Some("/?file=guide%2Fnext.md"));
    }

    #[test]
    fn test_rooted_link() {
        let url = rewrite_document_link("/notes/a.md", &ctx(ViewMode::Page, "guide/intro.md"));
        assert_eq!(url.as_deref(), Some("/?file=notes%2Fa.md"));
    }

    #[test]
    fn test_escaping_root_left_untouched() {
        assert!(rewrite_document_link("../../x.md", &ctx(ViewMode::Page, "a/b.md")).is_none());
    }

    #[test]
    fn test_non_document_links_untouched() {
        let c = ctx(ViewMode::Page, "index.md");
        assert!(rewrite_document_link("https://example.com/a.md", &c).is_none());
        assert!(rewrite_document_link("#section", &c).is_none());
        assert!(rewrite_document_link("mailto:a@b.c", &c).is_none());
        assert!(rewrite_document_link("image.png", &c).is_none());
        assert!(rewrite_document_link("ftp://host/a.md", &c).is_none());
        assert!(rewrite_document_link("", &c).is_none());
    }

    #[test]
    fn test_no_current_document() {
        let url = rewrite_document_link("a.md", &LinkContext::default());
        assert_eq!(url.as_deref(), Some("/?file=a.md"));
    }

    #[test]
    fn test_is_internal_link() {
        assert!(is_internal_link("relative-page.md"));
        assert!(is_internal_link("/docs/hello.md"));
        assert!(!is_internal_link("https://example.com"));
        assert!(!is_internal_link("http://example.com"));
        assert!(!is_internal_link("#anchor"));
        assert!(!is_internal_link("mailto:test@example.com"));
    }
}
