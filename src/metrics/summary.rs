//! Human-facing summary of one scored piece of content.

use serde::{Deserialize, Serialize};

use super::engagement::{EngagementMetrics, round_to};
use super::reward::calculate_reward;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Excellent,
    VeryGood,
    Good,
    Fair,
    NeedsImprovement,
}

impl QualityGrade {
    #[must_use]
    pub fn from_seo_score(seo_score: f64) -> Self {
        if seo_score >= 90.0 {
            Self::Excellent
        } else if seo_score >= 75.0 {
            Self::VeryGood
        } else if seo_score >= 60.0 {
            Self::Good
        } else if seo_score >= 45.0 {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub seo_score: f64,
    pub engagement: EngagementMetrics,
    pub reward: f64,
    pub quality_grade: QualityGrade,
    pub recommendations: Vec<String>,
}

/// Bundle score, engagement, reward, grade and advice for display.
#[must_use]
pub fn metrics_summary(seo_score: f64, engagement: &EngagementMetrics) -> MetricsSummary {
    let reward = calculate_reward(seo_score, engagement);
    MetricsSummary {
        seo_score: round_to(seo_score, 1),
        engagement: *engagement,
        reward: round_to(reward, 4),
        quality_grade: QualityGrade::from_seo_score(seo_score),
        recommendations: recommendations(seo_score, engagement),
    }
}

#[must_use]
pub fn recommendations(seo_score: f64, engagement: &EngagementMetrics) -> Vec<String> {
    let mut out = Vec::new();
    if seo_score < 70.0 {
        out.push("Improve SEO optimization: work keywords in more naturally".to_string());
    }
    if engagement.ctr < 0.02 {
        out.push("Improve the title to raise click-through rate".to_string());
    }
    if engagement.time_on_page < 60.0 {
        out.push("Make the content more engaging to increase time on page".to_string());
    }
    if engagement.search_position > 10.0 {
        out.push("Needs more optimization to improve search ranking".to_string());
    }
    if engagement.bounce_rate > 0.7 {
        out.push("High bounce rate: improve content quality and relevance".to_string());
    }
    if out.is_empty() {
        out.push("Excellent content, keep using this strategy".to_string());
    }
    out
}
