//! Keyboard shortcuts of both views.
//!
//! Keys are the DOM `KeyboardEvent.key` values. Ctrl+F always opens search,
//! even in the slide view where a plain `f` toggles fullscreen.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideAction {
    Next,
    Previous,
    First,
    Last,
    ToggleFullscreen,
    ToggleOverview,
    ToggleSearch,
    CloseOverlays,
}

impl SlideAction {
    /// Whether the browser's default handling of the key must be suppressed.
    pub fn prevents_default(self) -> bool {
        !matches!(self, SlideAction::CloseOverlays)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Toggle the search panel and focus its input.
    ToggleSearch,
    CloseOverlays,
}

impl PageAction {
    pub fn prevents_default(self) -> bool {
        matches!(self, PageAction::ToggleSearch)
    }
}

pub fn slide_action(key: &str, ctrl: bool) -> Option<SlideAction> {
    match (key, ctrl) {
        ("f" | "F", true) => Some(SlideAction::ToggleSearch),
        ("o" | "O", true) => Some(SlideAction::ToggleOverview),
        ("ArrowRight" | " ", _) => Some(SlideAction::Next),
        ("ArrowLeft", _) => Some(SlideAction::Previous),
        ("Home", _) => Some(SlideAction::First),
        ("End", _) => Some(SlideAction::Last),
        ("f" | "F11", false) => Some(SlideAction::ToggleFullscreen),
        ("Escape", _) => Some(SlideAction::CloseOverlays),
        _ => None,
    }
}

pub fn page_action(key: &str, ctrl: bool) -> Option<PageAction> {
    match (key, ctrl) {
        ("f" | "F", true) => Some(PageAction::ToggleSearch),
        ("Escape", _) => Some(PageAction::CloseOverlays),
        _ => None,
    }
}
