use std::sync::Arc;

use flavorstat_core::types::{IngredientId, PartitionedGroups, RatedRecipe, Recipe, RecipeId};
use flavorstat_stats::{mann_whitney_u, ConfidenceTier, SignificanceTester, TestOutcome};

fn group(ratings: &[u8], first_id: i64) -> Vec<RatedRecipe> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, &rating)| {
            let recipe = Recipe::new(RecipeId(first_id + i as i64), "[1]", vec![IngredientId(1)]);
            RatedRecipe::new(Arc::new(recipe), rating)
        })
        .collect()
}

fn groups(good: &[u8], bad: &[u8]) -> PartitionedGroups {
    PartitionedGroups { good: group(good, 0), bad: group(bad, 10_000) }
}

fn close(a: f64, b: f64, tol: f64) -> bool { (a - b).abs() < tol }

#[test]
fn separated_samples_match_normal_approximation() {
    let r = mann_whitney_u(&[1.0, 2.0, 3.0, 4.0, 5.0], &[6.0, 7.0, 8.0, 9.0, 10.0]).expect("two samples");
    assert!(close(r.u_statistic, 0.0, 1e-12));
    assert!(close(r.z_score, 2.506_718_245_762, 1e-9));
    assert!(close(r.p_value, 0.012_185_780_355, 1e-9), "p = {}", r.p_value);
}

#[test]
fn ties_shrink_the_variance() {
    let r = mann_whitney_u(&[1.0, 1.0, 2.0, 2.0, 3.0], &[2.0, 3.0, 3.0, 4.0, 4.0]).expect("two samples");
    assert!(close(r.u_statistic, 3.0, 1e-12));
    assert!(close(r.p_value, 0.052_411_628_671, 1e-9), "p = {}", r.p_value);
}

#[test]
fn identical_samples_are_not_significant() {
    let r = mann_whitney_u(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).expect("two samples");
    assert!(close(r.p_value, 1.0, 1e-12));
    let constant = mann_whitney_u(&[3.0, 3.0, 3.0], &[3.0, 3.0]).expect("two samples");
    assert!(close(constant.p_value, 1.0, 1e-12), "all ties give no evidence");
}

#[test]
fn tiers_are_inclusive_at_their_upper_bound() {
    assert_eq!(ConfidenceTier::classify(0.0), ConfidenceTier::Reject99);
    assert_eq!(ConfidenceTier::classify(0.01), ConfidenceTier::Reject99);
    assert_eq!(ConfidenceTier::classify(0.010_000_1), ConfidenceTier::Reject95);
    assert_eq!(ConfidenceTier::classify(0.05), ConfidenceTier::Reject95);
    assert_eq!(ConfidenceTier::classify(0.050_000_1), ConfidenceTier::Reject90);
    assert_eq!(ConfidenceTier::classify(0.10), ConfidenceTier::Reject90);
    assert_eq!(ConfidenceTier::classify(0.100_000_1), ConfidenceTier::NotSignificant);
    assert_eq!(ConfidenceTier::classify(1.0), ConfidenceTier::NotSignificant);
}

#[test]
fn twenty_good_rows_skip_the_test() {
    let report = SignificanceTester::new().evaluate("kale", &groups(&[5; 20], &[1, 2, 3]));
    assert_eq!(report.good.count, 20);
    assert_eq!(report.outcome, TestOutcome::SampleTooSmall);
    assert!(report.to_string().contains("Since no more than 20 recipes contain kale"));
}

#[test]
fn twenty_one_good_rows_run_the_test() {
    let report = SignificanceTester::new().evaluate("kale", &groups(&[5; 21], &[1, 2, 3]));
    assert!(matches!(report.outcome, TestOutcome::Tested { .. }));
}

#[test]
fn empty_bad_group_cannot_be_compared() {
    let report = SignificanceTester::new().evaluate("salt", &groups(&[4; 30], &[]));
    assert_eq!(report.outcome, TestOutcome::NoComparisonGroup);
    assert_eq!(report.bad.mean, None);
    assert!(report.to_string().contains("There are no rated recipes without salt."));
}

#[test]
fn thirty_recipe_scenario_reports_counts_means_and_verdict() {
    let mut good = vec![4u8; 12];
    good.extend([5u8; 13]);
    let report = SignificanceTester::new().evaluate("x", &groups(&good, &[1, 2, 2, 2, 3]));

    assert_eq!(report.good.count, 25);
    assert_eq!(report.bad.count, 5);
    assert!(close(report.good.mean.expect("good mean"), 4.52, 1e-12));
    assert!(close(report.bad.mean.expect("bad mean"), 2.0, 1e-12));
    match report.outcome {
        TestOutcome::Tested { u_statistic, p_value, tier } => {
            assert!(close(u_statistic, 125.0, 1e-12));
            assert!(close(p_value, 1.896_577e-4, 1e-9), "p = {p_value}");
            assert_eq!(tier, ConfidenceTier::Reject99);
        }
        other => panic!("expected a test, got {other:?}"),
    }

    let text = report.to_string();
    assert!(text.contains("The average rating for recipes with x, based on 25 samples, is 4.52."));
    assert!(text.contains("The average rating for recipes without x, based on 5 samples, is 2.0."));
    assert!(text.contains("Applying Mann-Whitney U-Test ..."));
    assert!(text.contains("With 99% confidence, we reject the hypothesis"));
}

#[test]
fn weak_difference_is_not_rejected() {
    let mut good = vec![3u8; 11];
    good.extend([4u8; 11]);
    let report = SignificanceTester::new().evaluate("tofu", &groups(&good, &[3, 4, 3, 4]));
    match report.outcome {
        TestOutcome::Tested { tier, .. } => assert_eq!(tier, ConfidenceTier::NotSignificant),
        other => panic!("expected a test, got {other:?}"),
    }
    assert!(report.to_string().contains("We cannot reject the hypothesis"));
}
