//! flavorstat-stats
//!
//! Descriptive statistics and the rank-sum significance test for the
//! good/bad rating groups.

pub mod mann_whitney;
pub mod tester;

pub use mann_whitney::{mann_whitney_u, MannWhitneyResult};
pub use tester::{ConfidenceTier, GroupSummary, SignificanceReport, SignificanceTester, TestOutcome, MIN_GOOD_SAMPLES_EXCLUSIVE};
