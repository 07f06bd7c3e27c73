use crate::error::AppError;
use crate::models::document::{Document, DocumentId};
use crate::models::search::SlideMatch;
use crate::models::slide::Slide;
use crate::rendering::links::LinkContext;
use crate::rendering::Renderer;
use crate::search::{search_slides, SearchQuery, CONTEXT_RADIUS};
use crate::slides::navigator::DEFAULT_PREVIEW_LENGTH;
use crate::slides::{segment, NavState, Navigator, OverviewEntry, Transition};

use super::fallback::{error_panel_html, sample_slides};
use super::keys::{slide_action, SlideAction};
use super::results::SearchOutcome;
use super::ViewMode;

/// Overlay panels and display flags of the slide view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlidePanels {
    pub overview_open: bool,
    pub search_open: bool,
    pub fullscreen: bool,
    pub menu_visible: bool,
}

/// State of the slide presenter for one loaded document.
#[derive(Debug, Clone)]
pub struct SlideView {
    document: Option<DocumentId>,
    load_error: Option<String>,
    slides: Vec<Slide>,
    navigator: Navigator,
    renderer: Renderer,
    links: LinkContext,
    /// Per-slide HTML rendered ahead of time; when absent slides are
    /// rendered on demand.
    rendered: Option<Vec<String>>,
    outcome: SearchOutcome<SlideMatch>,
    panels: SlidePanels,
    context_radius: usize,
    preview_length: usize,
}

impl SlideView {
    pub fn from_document(renderer: &Renderer, document: &Document) -> Self {
        let slides = segment(&document.content);
        tracing::debug!(document = %document.id, slides = slides.len(), "document segmented");
        Self::build(renderer, Some(document.id.clone()), None, slides)
    }

    /// A single sample slide shown under the error panel.
    pub fn from_load_error(renderer: &Renderer, id: Option<DocumentId>, message: &str) -> Self {
        tracing::warn!(document = ?id.as_ref().map(DocumentId::as_str), %message, "showing slide fallback");
        Self::build(renderer, id, Some(message.to_string()), sample_slides())
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
        slides: Vec<Slide>,
    ) -> Self {
        Self {
            links: LinkContext::new(ViewMode::Slides, document.clone()),
            navigator: Navigator::new(slides.len()),
            document,
            load_error,
            slides,
            renderer: renderer.clone(),
            rendered: None,
            outcome: SearchOutcome::Cleared,
            panels: SlidePanels::default(),
            context_radius: CONTEXT_RADIUS,
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }

    /// A deck whose slides were rendered elsewhere. `rendered` must hold one
    /// entry per slide.
    pub fn from_rendered(
        document: Option<DocumentId>,
        load_error: Option<String>,
        slides: Vec<Slide>,
        rendered: Vec<String>,
    ) -> Result<Self, AppError> {
        if slides.is_empty() || slides.len() != rendered.len() {
            return Err(AppError::BadRequest(format!(
                "Expected one rendered slide per slide, got {} for {}",
                rendered.len(),
                slides.len()
            )));
        }
        let mut view = Self::build(&Renderer::default(), document, load_error, slides);
        view.rendered = Some(rendered);
        Ok(view)
    }

    /// Content HTML of every slide, without the error panel.
    pub fn render_all(&self) -> Vec<String> {
        match &self.rendered {
            Some(rendered) => rendered.clone(),
            None => self
                .slides
                .iter()
                .map(|slide| self.renderer.render(&slide.content, &self.links))
                .collect(),
        }
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    pub fn with_preview_length(mut self, length: usize) -> Self {
        self.preview_length = length;
        self
    }

    pub fn document(&self) -> Option<&DocumentId> {
        self.document.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current()
    }

    pub fn current_slide(&self) -> &Slide {
        // The deck is never empty and the navigator stays within it.
        &self.slides[self.navigator.current().min(self.slides.len() - 1)]
    }

    /// HTML of the current slide, preceded by the error panel after a
    /// failed load.
    pub fn render_current(&self) -> String {
        let content = match &self.rendered {
            Some(rendered) => rendered[self.navigator.current().min(rendered.len() - 1)].clone(),
            None => self
                .renderer
                .render(&self.current_slide().content, &self.links),
        };
        match &self.load_error {
            Some(message) => error_panel_html(message, ViewMode::Slides) + &content,
            None => content,
        }
    }

    pub fn nav_state(&self) -> NavState {
        self.navigator.nav_state()
    }

    pub fn overview(&self) -> Vec<OverviewEntry> {
        self.navigator.overview(&self.slides, self.preview_length)
    }

    pub fn next(&mut self) -> Transition {
        self.navigator.next()
    }

    pub fn previous(&mut self) -> Transition {
        self.navigator.previous()
    }

    pub fn jump(&mut self, index: usize) -> Transition {
        self.navigator.jump(index)
    }

    pub fn reset(&mut self) -> Transition {
        self.navigator.reset()
    }

    pub fn last(&mut self) -> Transition {
        self.navigator.last()
    }

    pub fn outcome(&self) -> &SearchOutcome<SlideMatch> {
        &self.outcome
    }

    /// Search every slide's raw content, replacing previous results.
    pub fn search(&mut self, query: &SearchQuery) -> &SearchOutcome<SlideMatch> {
        let radius = self.context_radius;
        let slides = &self.slides;
        self.outcome = SearchOutcome::run(query, |q| search_slides(slides, q, radius));
        &self.outcome
    }

    pub fn clear_search(&mut self) {
        self.outcome = SearchOutcome::Cleared;
    }

    /// Go to the slide holding result `index` and close the search panel.
    pub fn jump_to_result(&mut self, index: usize) -> Transition {
        let Some(slide_index) = self.outcome.get(index).map(|m| m.slide_index) else {
            return Transition::Ignored;
        };
        let transition = self.navigator.jump(slide_index);
        self.panels.search_open = false;
        transition
    }

    pub fn panels(&self) -> SlidePanels {
        self.panels
    }

    pub fn toggle_overview(&mut self) {
        self.panels.overview_open = !self.panels.overview_open;
    }

    pub fn toggle_search(&mut self) {
        self.panels.search_open = !self.panels.search_open;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.panels.fullscreen = !self.panels.fullscreen;
    }

    /// Follow a fullscreen change made outside the view (e.g. the browser's
    /// own exit shortcut).
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.panels.fullscreen = fullscreen;
    }

    pub fn toggle_menu(&mut self) {
        self.panels.menu_visible = !self.panels.menu_visible;
    }

    pub fn close_overlays(&mut self) {
        self.panels.overview_open = false;
        self.panels.search_open = false;
    }

    /// Apply the shortcut bound to `key`, if any, and report it.
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> Option<SlideAction> {
        let action = slide_action(key, ctrl)?;
        match action {
            SlideAction::Next => {
                self.next();
            }
            SlideAction::Previous => {
                self.previous();
            }
            SlideAction::First => {
                self.reset();
            }
            SlideAction::Last => {
                self.last();
            }
            SlideAction::ToggleFullscreen => self.toggle_fullscreen(),
            SlideAction::ToggleOverview => self.toggle_overview(),
            SlideAction::ToggleSearch => self.toggle_search(),
            SlideAction::CloseOverlays => self.close_overlays(),
        }
        Some(action)
    }
}
