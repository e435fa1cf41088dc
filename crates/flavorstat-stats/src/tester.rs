use std::fmt;

use tracing::debug;

use flavorstat_core::types::{mean_rating, PartitionedGroups, RatedRecipe};

use crate::mann_whitney::mann_whitney_u;

/// The rank-sum test only runs when strictly more Good rows than this exist.
pub const MIN_GOOD_SAMPLES_EXCLUSIVE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSummary {
    pub count: usize,
    /// `None` for an empty group.
    pub mean: Option<f64>,
}

impl GroupSummary {
    pub fn of(group: &[RatedRecipe]) -> Self { Self { count: group.len(), mean: mean_rating(group) } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    Reject99,
    Reject95,
    Reject90,
    NotSignificant,
}

impl ConfidenceTier {
    /// First match wins; every bound is inclusive from above.
    pub fn classify(p_value: f64) -> Self {
        if p_value <= 0.01 {
            Self::Reject99
        } else if p_value <= 0.05 {
            Self::Reject95
        } else if p_value <= 0.10 {
            Self::Reject90
        } else {
            Self::NotSignificant
        }
    }

    pub fn confidence_percent(self) -> Option<u8> {
        match self {
            Self::Reject99 => Some(99),
            Self::Reject95 => Some(95),
            Self::Reject90 => Some(90),
            Self::NotSignificant => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestOutcome {
    /// `|Good| <= MIN_GOOD_SAMPLES_EXCLUSIVE`.
    SampleTooSmall,
    /// Every joined row contains the ingredient.
    NoComparisonGroup,
    Tested { u_statistic: f64, p_value: f64, tier: ConfidenceTier },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceReport {
    pub ingredient: String,
    pub good: GroupSummary,
    pub bad: GroupSummary,
    pub outcome: TestOutcome,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SignificanceTester;

impl SignificanceTester {
    pub fn new() -> Self { Self }

    pub fn evaluate(&self, ingredient: &str, groups: &PartitionedGroups) -> SignificanceReport {
        let good = GroupSummary::of(&groups.good);
        let bad = GroupSummary::of(&groups.bad);
        let outcome = if good.count <= MIN_GOOD_SAMPLES_EXCLUSIVE {
            TestOutcome::SampleTooSmall
        } else {
            match mann_whitney_u(&as_f64(&groups.good), &as_f64(&groups.bad)) {
                Some(result) => TestOutcome::Tested {
                    u_statistic: result.u_statistic,
                    p_value: result.p_value,
                    tier: ConfidenceTier::classify(result.p_value),
                },
                None => TestOutcome::NoComparisonGroup,
            }
        };
        debug!(%ingredient, good = good.count, bad = bad.count, ?outcome, "evaluated significance");
        SignificanceReport { ingredient: ingredient.to_string(), good, bad, outcome }
    }
}

fn as_f64(group: &[RatedRecipe]) -> Vec<f64> { group.iter().map(|r| f64::from(r.rating)).collect() }

impl fmt::Display for SignificanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(f, "with", &self.ingredient, self.good)?;
        write_summary(f, "without", &self.ingredient, self.bad)?;
        writeln!(f)?;
        match self.outcome {
            TestOutcome::SampleTooSmall => writeln!(
                f,
                "Since no more than {MIN_GOOD_SAMPLES_EXCLUSIVE} recipes contain {}, we cannot execute a meaningful hypothesis test.",
                self.ingredient
            ),
            TestOutcome::NoComparisonGroup => {
                writeln!(f, "Every rated recipe contains {}, so there is no group to compare against.", self.ingredient)
            }
            TestOutcome::Tested { p_value, tier, .. } => {
                writeln!(f, "Applying Mann-Whitney U-Test ...")?;
                writeln!(f)?;
                match tier.confidence_percent() {
                    Some(pct) => writeln!(
                        f,
                        "With {pct}% confidence, we reject the hypothesis that the two distributions have the same mean.  (p = {p_value})"
                    ),
                    None => writeln!(f, "We cannot reject the hypothesis that the distributions have the same mean.  (p = {p_value})"),
                }
            }
        }
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, side: &str, ingredient: &str, summary: GroupSummary) -> fmt::Result {
    match summary.mean {
        Some(mean) => writeln!(
            f,
            "The average rating for recipes {side} {ingredient}, based on {} samples, is {mean:?}.",
            summary.count
        ),
        None => writeln!(f, "There are no rated recipes {side} {ingredient}."),
    }
}
