use crate::error::AppError;
use crate::models::document::{Document, DocumentId};
use crate::models::search::SearchMatch;
use crate::rendering::links::LinkContext;
use crate::rendering::text::TextTree;
use crate::rendering::toc::{build_toc, TocEntry};
use crate::rendering::Renderer;
use crate::search::highlight::{apply_highlights, clear_highlights, jump_to};
use crate::search::{page_matches, SearchPattern, SearchQuery, CONTEXT_RADIUS};

use super::fallback::{error_panel_html, PAGE_SAMPLE_MARKDOWN};
use super::keys::{page_action, PageAction};
use super::results::SearchOutcome;
use super::ViewMode;

/// Overlay panels of the page view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagePanels {
    pub toc_open: bool,
    pub search_open: bool,
    /// Toolbar buttons shown; the menu toggle itself is always visible.
    pub menu_visible: bool,
}

/// State of the continuous-page view for one loaded document.
#[derive(Debug, Clone)]
pub struct PageView {
    document: Option<DocumentId>,
    load_error: Option<String>,
    tree: TextTree,
    toc: Vec<TocEntry>,
    outcome: SearchOutcome<SearchMatch>,
    pattern: Option<SearchPattern>,
    current_result: Option<usize>,
    panels: PagePanels,
    context_radius: usize,
}

impl PageView {
    pub fn from_document(renderer: &Renderer, document: &Document) -> Self {
        let links = LinkContext::new(ViewMode::Page, Some(document.id.clone()));
        Self::build(renderer, Some(document.id.clone()), None, &document.content, &links)
    }

    /// The error panel followed by rendered sample content.
    pub fn from_load_error(renderer: &Renderer, id: Option<DocumentId>, message: &str) -> Self {
        tracing::warn!(document = ?id.as_ref().map(DocumentId::as_str), %message, "showing page fallback");
        let links = LinkContext::new(ViewMode::Page, id.clone());
        Self::build(
            renderer,
            id,
            Some(message.to_string()),
            PAGE_SAMPLE_MARKDOWN,
            &links,
        )
    }

    pub fn from_load(
        renderer: &Renderer,
        id: DocumentId,
        loaded: Result<String, AppError>,
    ) -> Self {
        match loaded {
            Ok(content) => Self::from_document(renderer, &Document::new(id, content)),
            Err(e) => Self::from_load_error(renderer, Some(id), &e.to_string()),
        }
    }

    fn build(
        renderer: &Renderer,
        document: Option<DocumentId>,
        load_error: Option<String>,
        markdown: &str,
        links: &LinkContext,
    ) -> Self {
        Self::from_tree(document, load_error, renderer.render_tree(markdown, links))
    }

    /// Build the view from content already rendered elsewhere (the browser
    /// receives server-rendered HTML). `load_error` is shown above it.
    pub fn from_rendered(
        document: Option<DocumentId>,
        load_error: Option<String>,
        content_html: &str,
    ) -> Self {
        Self::from_tree(document, load_error, TextTree::from_html(content_html))
    }

    fn from_tree(
        document: Option<DocumentId>,
        load_error: Option<String>,
        mut tree: TextTree,
    ) -> Self {
        let toc = build_toc(&mut tree);
        Self {
            document,
            load_error,
            tree,
            toc,
            outcome: SearchOutcome::Cleared,
            pattern: None,
            current_result: None,
            panels: PagePanels::default(),
            context_radius: CONTEXT_RADIUS,
        }
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    pub fn document(&self) -> Option<&DocumentId> {
        self.document.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    pub fn tree(&self) -> &TextTree {
        &self.tree
    }

    /// Content HTML with heading ids and highlight marks, without the error
    /// panel.
    pub fn content_html(&self) -> String {
        self.tree.to_html()
    }

    /// Body HTML: the error panel (after a failed load) and the content with
    /// any highlight marks.
    pub fn html(&self) -> String {
        let content = self.content_html();
        match &self.load_error {
            Some(message) => error_panel_html(message, ViewMode::Page) + &content,
            None => content,
        }
    }

    pub fn text_content(&self) -> String {
        self.tree.text_content()
    }

    pub fn outcome(&self) -> &SearchOutcome<SearchMatch> {
        &self.outcome
    }

    pub fn current_result(&self) -> Option<usize> {
        self.current_result
    }

    /// Search the rendered text, replacing previous results and highlights.
    ///
    /// A blank query clears the search; an invalid pattern clears the
    /// highlights and records the error message.
    pub fn search(&mut self, query: &SearchQuery) -> &SearchOutcome<SearchMatch> {
        if query.is_blank() {
            self.clear_search();
            return &self.outcome;
        }

        clear_highlights(&mut self.tree);
        self.current_result = None;

        let text = self.tree.text_content();
        let radius = self.context_radius;
        let mut compiled = None;
        self.outcome = SearchOutcome::run(query, |q| {
            let Some(pattern) = q.compile()? else {
                return Ok(Vec::new());
            };
            let results = page_matches(&text, &pattern, radius);
            compiled = Some(pattern);
            Ok(results)
        });

        if let Some(pattern) = &compiled {
            apply_highlights(&mut self.tree, pattern);
        }
        self.pattern = compiled;
        &self.outcome
    }

    pub fn clear_search(&mut self) {
        clear_highlights(&mut self.tree);
        self.outcome = SearchOutcome::Cleared;
        self.pattern = None;
        self.current_result = None;
    }

    /// Point-highlight result `index`; the view scrolls to `#current-match`.
    ///
    /// Returns the ordinal of the text leaf holding the match start, or
    /// `None` for an unknown index.
    pub fn jump_to_result(&mut self, index: usize) -> Option<usize> {
        let (position, len) = self
            .outcome
            .get(index)
            .map(|m| (m.position, m.matched.chars().count()))?;

        if let Some(pattern) = &self.pattern {
            apply_highlights(&mut self.tree, pattern);
        }
        let leaf = jump_to(&mut self.tree, position, len);
        self.current_result = Some(index);
        leaf
    }

    pub fn panels(&self) -> PagePanels {
        self.panels
    }

    pub fn toggle_toc(&mut self) {
        self.panels.toc_open = !self.panels.toc_open;
    }

    pub fn toggle_search(&mut self) {
        self.panels.search_open = !self.panels.search_open;
    }

    pub fn toggle_menu(&mut self) {
        self.panels.menu_visible = !self.panels.menu_visible;
    }

    pub fn close_overlays(&mut self) {
        self.panels.toc_open = false;
        self.panels.search_open = false;
    }

    /// Apply the shortcut bound to `key`, if any, and report it.
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> Option<PageAction> {
        let action = page_action(key, ctrl)?;
        match action {
            PageAction::ToggleSearch => self.toggle_search(),
            PageAction::CloseOverlays => self.close_overlays(),
        }
        Some(action)
    }
}
