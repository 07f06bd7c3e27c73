//! Per-view state: everything a page or slide view shows, independent of
//! how it is drawn.

pub mod fallback;
pub mod keys;
pub mod page;
pub mod results;
pub mod slide;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub use page::PageView;
pub use results::SearchOutcome;
pub use slide::SlideView;

/// The two ways a document can be presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Continuous reading with a table of contents.
    #[default]
    Page,
    /// One heading-delimited slide at a time.
    Slides,
}

impl ViewMode {
    /// Path of the view within the application.
    pub fn route(self) -> &'static str {
        match self {
            ViewMode::Page => "/",
            ViewMode::Slides => "/slides",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Page => "page",
            ViewMode::Slides => "slides",
        }
    }

    /// The view the mode switch button leads to.
    pub fn other(self) -> Self {
        match self {
            ViewMode::Page => ViewMode::Slides,
            ViewMode::Slides => ViewMode::Page,
        }
    }

    /// URL opening `file` in this view, keeping an explicit theme.
    pub fn url_for(self, file: &str, theme: Option<&str>) -> String {
        let mut url = format!("{}?file={}", self.route(), urlencoding::encode(file));
        if let Some(theme) = theme {
            url.push_str("&theme=");
            url.push_str(&urlencoding::encode(theme));
        }
        url
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "page" => Ok(ViewMode::Page),
            "slides" | "slide" => Ok(ViewMode::Slides),
            other => Err(AppError::BadRequest(format!("Unknown view mode: {other}"))),
        }
    }
}
