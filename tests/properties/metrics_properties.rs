use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use seo_engine::metrics::{
    EngagementMetrics, calculate_reward, calculate_seo_score, simulate_engagement_metrics_with,
};

fn arb_metrics() -> impl Strategy<Value = EngagementMetrics> {
    (0.001f64..=0.15, 10.0f64..=600.0, 1.0f64..=50.0, 0.2f64..=0.95).prop_map(
        |(ctr, time_on_page, search_position, bounce_rate)| EngagementMetrics {
            ctr,
            time_on_page,
            search_position,
            bounce_rate,
        },
    )
}

proptest! {
    #[test]
    fn seo_score_is_bounded(
        content in ".{0,400}",
        keywords in prop::collection::vec("[a-zñ ]{0,12}", 0..4),
        target in 0usize..5000
    ) {
        let score = calculate_seo_score(&content, &keywords, target);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn seo_score_never_panics_on_arbitrary_bytes(
        bytes in prop::collection::vec(any::<u8>(), 0..600)
    ) {
        let content = String::from_utf8_lossy(&bytes);
        let score = calculate_seo_score(&content, &["seo"], 600);
        prop_assert!(score.is_finite());
    }

    #[test]
    fn reward_is_bounded(seo in 0.0f64..=100.0, metrics in arb_metrics()) {
        let reward = calculate_reward(seo, &metrics);
        prop_assert!((0.0..=1.0).contains(&reward));
    }

    #[test]
    fn simulated_metrics_respect_ranges(
        words in 0usize..2000,
        seo in 0.0f64..=100.0,
        strategy in 0usize..8,
        seed in any::<u64>()
    ) {
        let content = "palabra ".repeat(words);
        let mut rng = StdRng::seed_from_u64(seed);
        let m = simulate_engagement_metrics_with(&mut rng, &content, seo, strategy);
        prop_assert!((0.001..=0.15).contains(&m.ctr));
        prop_assert!((10.0..=600.0).contains(&m.time_on_page));
        prop_assert!((1.0..=50.0).contains(&m.search_position));
        prop_assert!((0.2..=0.95).contains(&m.bounce_rate));
    }
}
