use rand::SeedableRng;
use rand::rngs::StdRng;

use seo_engine::metrics::{
    EngagementMetrics, FALLBACK_REWARD, QualityGrade, calculate_reward, calculate_seo_score,
    evaluate_with, metrics_summary, seo_breakdown, simulate_engagement_metrics_with,
};
use seo_engine::test_utils::fixtures::sample_article;
use seo_engine::test_utils::{TestCase, run_table_tests};

#[test]
fn structure_points_table() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "plain",
            input: "one line of text",
            expected: 0.0,
        },
        TestCase {
            name: "line_breaks",
            input: "first\nsecond",
            expected: 3.0,
        },
        TestCase {
            name: "headings",
            input: "## heading",
            expected: 4.0,
        },
        TestCase {
            name: "emphasis",
            input: "some *emphasis*",
            expected: 3.0,
        },
        TestCase {
            name: "everything",
            input: "## heading\n\n**bold**",
            expected: 10.0,
        },
    ];
    let no_keywords: [&str; 0] = [];
    run_table_tests(cases, |content| {
        seo_breakdown(content, &no_keywords, 600).structure
    })
}

#[test]
fn sample_article_scores_well() {
    let article = sample_article("marketing digital");
    let score = calculate_seo_score(&article, &["marketing digital", "equipos"], 400);
    assert!(score >= 60.0, "score was {score}");
    assert!(score <= 100.0);
}

#[test]
fn empty_inputs_are_bounded() {
    let none: [&str; 0] = [];
    for target in [0, 1, 600, 10_000] {
        let score = calculate_seo_score("", &none, target);
        assert!((0.0..=100.0).contains(&score));
        let score = calculate_seo_score("", &[""], target);
        assert!((0.0..=100.0).contains(&score));
    }
}

#[test]
fn reward_is_bounded_for_clamped_metrics() {
    let mut rng = StdRng::seed_from_u64(8);
    for score in [0.5, 10.0, 45.0, 80.0, 100.0] {
        for strategy in 0..5 {
            let m = simulate_engagement_metrics_with(&mut rng, &"w ".repeat(700), score, strategy);
            let reward = calculate_reward(score, &m);
            assert!((0.0..=1.0).contains(&reward));
        }
    }
}

#[test]
fn corners_of_metric_ranges() {
    let corners = [
        EngagementMetrics { ctr: 0.001, time_on_page: 10.0, search_position: 50.0, bounce_rate: 0.95 },
        EngagementMetrics { ctr: 0.15, time_on_page: 600.0, search_position: 1.0, bounce_rate: 0.2 },
        EngagementMetrics { ctr: 0.15, time_on_page: 10.0, search_position: 1.0, bounce_rate: 0.95 },
    ];
    for m in corners {
        for seo in [0.0, 100.0] {
            let reward = calculate_reward(seo, &m);
            assert!((0.0..=1.0).contains(&reward), "{reward} for {m:?}");
        }
    }
}

#[test]
fn nan_inputs_degrade_to_fallbacks() {
    let metrics = simulate_engagement_metrics_with(&mut StdRng::seed_from_u64(1), "x", f64::NAN, 0);
    assert_eq!(metrics, EngagementMetrics::NEUTRAL);
    assert!((calculate_reward(f64::NAN, &metrics) - FALLBACK_REWARD).abs() < f64::EPSILON);
}

#[test]
fn pipeline_feeds_summary() {
    let article = sample_article("seo local");
    let eval = evaluate_with(&mut StdRng::seed_from_u64(12), &article, &["seo local"], 400, 1);
    let summary = metrics_summary(eval.seo_score, &eval.engagement);
    assert!((summary.reward - eval.reward).abs() < 1e-4);
    assert_eq!(summary.quality_grade, QualityGrade::from_seo_score(eval.seo_score));
    assert!(!summary.recommendations.is_empty());
}
