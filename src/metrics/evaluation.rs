//! Score -> engagement -> reward, in the order the bandit consumes them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::engagement::{EngagementMetrics, simulate_engagement_metrics_with};
use super::reward::calculate_reward;
use super::seo::calculate_seo_score;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub seo_score: f64,
    pub engagement: EngagementMetrics,
    pub reward: f64,
}

/// Evaluate content produced with `arm`, using the thread-local RNG.
pub fn evaluate<S: AsRef<str>>(
    content: &str,
    keywords: &[S],
    target_length: usize,
    arm: usize,
) -> Evaluation {
    evaluate_with(&mut rand::rng(), content, keywords, target_length, arm)
}

pub fn evaluate_with<R: Rng + ?Sized, S: AsRef<str>>(
    rng: &mut R,
    content: &str,
    keywords: &[S],
    target_length: usize,
    arm: usize,
) -> Evaluation {
    let seo_score = calculate_seo_score(content, keywords, target_length);
    let engagement = simulate_engagement_metrics_with(rng, content, seo_score, arm);
    let reward = calculate_reward(seo_score, &engagement);
    Evaluation {
        seo_score,
        engagement,
        reward,
    }
}
