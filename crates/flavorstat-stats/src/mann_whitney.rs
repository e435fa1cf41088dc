//! Two-sided Mann-Whitney U test (Wilcoxon rank-sum).
//!
//! Uses the large-sample normal approximation with the tie correction on the
//! variance and a 0.5 continuity correction, the same asymptotic form SciPy's
//! `mannwhitneyu(..., alternative="two-sided", method="asymptotic")` uses.
//!
//! 1. Pool and sort both samples, averaging ranks over ties
//! 2. `U1 = R1 - n1(n1+1)/2`, `U2 = n1*n2 - U1`, `U = max(U1, U2)`
//! 3. `sigma = sqrt(n1*n2/12 * ((n+1) - sum(t^3 - t) / (n(n-1))))`
//! 4. `z = (U - n1*n2/2 - 0.5) / sigma`, `p = 2 * P(Z > z)` clipped to `[0, 1]`
#![allow(clippy::cast_precision_loss)]

use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MannWhitneyResult {
    /// U statistic of the first sample (`U1`).
    pub u_statistic: f64,
    pub z_score: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

/// Returns `None` when either sample is empty.
#[must_use]
pub fn mann_whitney_u(first: &[f64], second: &[f64]) -> Option<MannWhitneyResult> {
    if first.is_empty() || second.is_empty() { return None; }
    let n1 = first.len() as f64;
    let n2 = second.len() as f64;
    let n = n1 + n2;

    let mut combined: Vec<(f64, bool)> = first
        .iter()
        .map(|&x| (x, true))
        .chain(second.iter().map(|&x| (x, false)))
        .collect();
    combined.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (ranks, tie_term) = rank_with_ties(&combined);
    let r1: f64 = ranks.iter().zip(&combined).filter(|(_, (_, first))| *first).map(|(rank, _)| rank).sum();

    let u1 = r1 - n1 * (n1 + 1.0) / 2.0;
    let u2 = n1 * n2 - u1;
    let u = u1.max(u2);
    let mu = n1 * n2 / 2.0;
    let sigma = (n1 * n2 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)))).sqrt();

    // Every observation tied: no rank information at all.
    if !(sigma > 0.0) {
        return Some(MannWhitneyResult { u_statistic: u1, z_score: 0.0, p_value: 1.0 });
    }

    let z_score = (u - mu - 0.5) / sigma;
    let p_value = erfc(z_score / SQRT_2).clamp(0.0, 1.0);
    Some(MannWhitneyResult { u_statistic: u1, z_score, p_value })
}

/// Average 1-based ranks for sorted values plus `sum(t^3 - t)` over tie groups.
fn rank_with_ties(sorted: &[(f64, bool)]) -> (Vec<f64>, f64) {
    let mut ranks = Vec::with_capacity(sorted.len());
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j < sorted.len() && sorted[j].0 == sorted[i].0 { j += 1; }
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        ranks.extend(std::iter::repeat(avg_rank).take(j - i));
        let t = (j - i) as f64;
        tie_term += t * t * t - t;
        i = j;
    }
    (ranks, tie_term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_average_over_ties() {
        let sorted = [(1.0, true), (2.0, false), (2.0, true), (2.0, false), (5.0, true)];
        let (ranks, tie_term) = rank_with_ties(&sorted);
        assert_eq!(ranks, vec![1.0, 3.0, 3.0, 3.0, 5.0]);
        assert!((tie_term - 24.0).abs() < 1e-12);
    }

    #[test]
    fn empty_sample_has_no_test() {
        assert!(mann_whitney_u(&[], &[1.0]).is_none());
        assert!(mann_whitney_u(&[1.0], &[]).is_none());
    }
}
