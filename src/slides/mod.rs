//! Slide deck support: splitting a document into slides and tracking the
//! presenter's position within them.

pub mod navigator;
pub mod segmenter;

pub use navigator::{NavState, Navigator, OverviewEntry, Transition};
pub use segmenter::segment;
