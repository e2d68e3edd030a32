//! Content metrics and reward computation.
//!
//! Every function here is pure apart from the engagement noise source, and
//! none of them fail. SEO scoring is total; engagement and reward log their
//! internal errors and return neutral values ([`EngagementMetrics::NEUTRAL`],
//! reward 0.5).

pub mod engagement;
pub mod evaluation;
pub mod reward;
pub mod seo;
pub mod summary;

pub use engagement::{
    EngagementMetrics, simulate_engagement_metrics, simulate_engagement_metrics_with,
};
pub use evaluation::{Evaluation, evaluate, evaluate_with};
pub use reward::{FALLBACK_REWARD, NormalizedSignals, calculate_reward};
pub use seo::{SeoBreakdown, calculate_seo_score, seo_breakdown};
pub use summary::{MetricsSummary, QualityGrade, metrics_summary};
