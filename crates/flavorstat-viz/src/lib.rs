//! flavorstat-viz
//!
//! Tabulates per-rating counts for the two groups and renders them as a
//! two-panel horizontal bar chart with mean markers.

pub mod chart;
pub mod histogram;

pub use chart::{capitalize, ComparisonChart, Panel, BAR_COLORS, CAPTION};
pub use histogram::{RatingHistogram, RATING_VALUES};
