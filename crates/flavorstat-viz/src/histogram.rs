use flavorstat_core::types::{mean_rating, RatedRecipe};

/// Rating values charted, bottom bar first.
pub const RATING_VALUES: [u8; 5] = [1, 2, 3, 4, 5];

/// Per-rating frequency counts of one group.
///
/// Ratings outside 1..=5 are not charted but still count toward `total`
/// and the mean.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingHistogram {
    counts: [usize; 5],
    total: usize,
    mean: Option<f64>,
}

impl RatingHistogram {
    pub fn from_group(group: &[RatedRecipe]) -> Self {
        let mut counts = [0usize; 5];
        for row in group {
            if let Some(slot) = bar_index(row.rating) { counts[slot] += 1; }
        }
        Self { counts, total: group.len(), mean: mean_rating(group) }
    }

    pub fn count(&self, rating: u8) -> usize { bar_index(rating).map_or(0, |i| self.counts[i]) }

    pub fn counts(&self) -> &[usize; 5] { &self.counts }

    pub fn total(&self) -> usize { self.total }

    pub fn mean(&self) -> Option<f64> { self.mean }

    /// Mean position on the zero-based bar axis (rating 1 sits at 0).
    pub fn mean_marker(&self) -> Option<f64> { self.mean.map(|m| m - 1.0) }

    pub fn max_count(&self) -> usize { self.counts.iter().copied().max().unwrap_or(0) }
}

fn bar_index(rating: u8) -> Option<usize> { RATING_VALUES.iter().position(|&r| r == rating) }
