use serde::{Deserialize, Serialize};

use crate::models::slide::Slide;

/// Characters of raw content shown in an overview card.
pub const DEFAULT_PREVIEW_LENGTH: usize = 100;

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The current slide changed (or was re-selected); the view must re-render
    /// the slide, the navigation controls and the overview highlight.
    Moved { from: usize, to: usize },
    /// The request was out of range or at a boundary and was ignored.
    Ignored,
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// Navigation-control state derived from the current position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavState {
    /// One-based index shown to the reader.
    pub position: usize,
    pub total: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Width of the progress bar, `(index + 1) / total * 100`.
    pub progress_percent: f64,
}

/// One card in the slide overview grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewEntry {
    pub index: usize,
    pub title: String,
    pub preview: String,
    pub active: bool,
}

/// Tracks the current slide of a deck with `total >= 1` slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    /// Create a navigator positioned on the first slide.
    ///
    /// A deck is never empty, so a `total` of zero is treated as one.
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.total
    }

    pub fn next(&mut self) -> Transition {
        if self.is_last() {
            return Transition::Ignored;
        }
        self.move_to(self.current + 1)
    }

    pub fn previous(&mut self) -> Transition {
        if self.is_first() {
            return Transition::Ignored;
        }
        self.move_to(self.current - 1)
    }

    /// Jump to `index`; out-of-range requests are silently ignored.
    pub fn jump(&mut self, index: usize) -> Transition {
        if index >= self.total {
            return Transition::Ignored;
        }
        self.move_to(index)
    }

    pub fn reset(&mut self) -> Transition {
        self.move_to(0)
    }

    pub fn last(&mut self) -> Transition {
        self.move_to(self.total - 1)
    }

    fn move_to(&mut self, to: usize) -> Transition {
        let from = self.current;
        self.current = to;
        tracing::debug!(from, to, total = self.total, "slide transition");
        Transition::Moved { from, to }
    }

    pub fn nav_state(&self) -> NavState {
        NavState {
            position: self.current + 1,
            total: self.total,
            prev_enabled: !self.is_first(),
            next_enabled: !self.is_last(),
            progress_percent: (self.current + 1) as f64 / self.total as f64 * 100.0,
        }
    }

    /// Overview cards for `slides`, with the current slide marked active.
    pub fn overview(&self, slides: &[Slide], preview_length: usize) -> Vec<OverviewEntry> {
        slides
            .iter()
            .enumerate()
            .map(|(index, slide)| OverviewEntry {
                index,
                title: slide.title.clone(),
                preview: overview_preview(&slide.raw_content, preview_length),
                active: index == self.current,
            })
            .collect()
    }
}

/// First `length` characters of `raw` followed by an ellipsis.
pub fn overview_preview(raw: &str, length: usize) -> String {
    let mut preview: String = raw.chars().take(length).collect();
    preview.push_str("...");
    preview
}
