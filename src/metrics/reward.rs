//! Composite reward (0.0-1.0) fed back to the bandit.
//!
//! `reward = 0.25*seo + 0.30*ctr + 0.25*time + 0.15*position + 0.05*bounce`
//! over individually normalized signals.

use tracing::{error, info};

use crate::error::{EngineError, Result};

use super::engagement::EngagementMetrics;

/// Reward returned when computation fails.
pub const FALLBACK_REWARD: f64 = 0.5;

pub const SEO_WEIGHT: f64 = 0.25;
pub const CTR_WEIGHT: f64 = 0.30;
pub const TIME_WEIGHT: f64 = 0.25;
pub const POSITION_WEIGHT: f64 = 0.15;
pub const BOUNCE_WEIGHT: f64 = 0.05;

/// CTR at or above this earns full credit.
const CTR_CEILING: f64 = 0.10;
/// Seconds on page at or above this earn full credit.
const TIME_CEILING_SECS: f64 = 180.0;
/// Positions at or beyond this earn nothing.
const POSITION_FLOOR: f64 = 20.0;

/// Each signal mapped onto 0.0-1.0 (higher is better).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSignals {
    pub seo: f64,
    pub ctr: f64,
    pub time: f64,
    pub position: f64,
    pub bounce: f64,
}

impl NormalizedSignals {
    pub fn from_metrics(seo_score: f64, engagement: &EngagementMetrics) -> Result<Self> {
        let inputs = [
            seo_score,
            engagement.ctr,
            engagement.time_on_page,
            engagement.search_position,
            engagement.bounce_rate,
        ];
        if inputs.iter().any(|value| !value.is_finite()) {
            return Err(EngineError::Metrics(format!(
                "non-finite reward input: seo={seo_score}, {engagement:?}"
            )));
        }
        Ok(Self {
            seo: seo_score / 100.0,
            ctr: (engagement.ctr / CTR_CEILING).min(1.0),
            time: (engagement.time_on_page / TIME_CEILING_SECS).min(1.0),
            position: 1.0 - engagement.search_position.min(POSITION_FLOOR) / POSITION_FLOOR,
            bounce: 1.0 - engagement.bounce_rate,
        })
    }

    #[must_use]
    pub fn weighted(&self) -> f64 {
        (SEO_WEIGHT * self.seo
            + CTR_WEIGHT * self.ctr
            + TIME_WEIGHT * self.time
            + POSITION_WEIGHT * self.position
            + BOUNCE_WEIGHT * self.bounce)
            .clamp(0.0, 1.0)
    }
}

/// Combine SEO score and engagement into one reward.
///
/// Never fails: on an internal error [`FALLBACK_REWARD`] is returned and the
/// error is logged.
pub fn calculate_reward(seo_score: f64, engagement: &EngagementMetrics) -> f64 {
    match NormalizedSignals::from_metrics(seo_score, engagement) {
        Ok(signals) => {
            let reward = signals.weighted();
            info!(
                reward,
                seo = signals.seo,
                ctr = signals.ctr,
                time = signals.time,
                "reward calculated"
            );
            reward
        }
        Err(err) => {
            error!(error = %err, "error calculating reward");
            FALLBACK_REWARD
        }
    }
}
