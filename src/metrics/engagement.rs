//! Simulated engagement signals.
//!
//! Without live analytics, engagement is estimated from the SEO score and the
//! strategy used: `base * multiplier * quality * (1 + noise)`, clamped to a
//! plausible range per metric.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    /// Click-through rate from search results, as a fraction.
    pub ctr: f64,
    /// Seconds spent on the page.
    pub time_on_page: f64,
    /// Rank in search results; lower is better.
    pub search_position: f64,
    /// Fraction of visits that leave without interacting.
    pub bounce_rate: f64,
}

impl EngagementMetrics {
    /// Returned when simulation fails.
    pub const NEUTRAL: Self = Self {
        ctr: 0.02,
        time_on_page: 60.0,
        search_position: 15.0,
        bounce_rate: 0.5,
    };
}

#[derive(Debug, Clone, Copy)]
struct StrategyMultipliers {
    ctr: f64,
    time: f64,
    position: f64,
    bounce: f64,
}

/// Indexed by strategy id. Unknown ids use entry 0.
const STRATEGY_MULTIPLIERS: [StrategyMultipliers; 5] = [
    StrategyMultipliers { ctr: 1.0, time: 1.2, position: 1.1, bounce: 0.9 },
    StrategyMultipliers { ctr: 1.3, time: 1.1, position: 1.0, bounce: 0.8 },
    StrategyMultipliers { ctr: 1.1, time: 0.9, position: 1.2, bounce: 0.85 },
    StrategyMultipliers { ctr: 1.2, time: 1.4, position: 0.95, bounce: 0.7 },
    StrategyMultipliers { ctr: 1.15, time: 1.0, position: 1.3, bounce: 0.75 },
];

const BASE_CTR: f64 = 0.02;
const BASE_POSITION: f64 = 15.0;
const BASE_BOUNCE: f64 = 0.7;
const MIN_BASE_TIME_SECS: f64 = 60.0;
const WORDS_PER_MINUTE: f64 = 200.0;

const CTR_NOISE: f64 = 0.2;
const TIME_NOISE: f64 = 0.15;
const POSITION_NOISE: f64 = 0.1;
const BOUNCE_NOISE: f64 = 0.1;

/// Simulate engagement with the thread-local RNG.
pub fn simulate_engagement_metrics(
    content: &str,
    seo_score: f64,
    strategy_id: usize,
) -> EngagementMetrics {
    simulate_engagement_metrics_with(&mut rand::rng(), content, seo_score, strategy_id)
}

/// Simulate engagement with a caller-supplied RNG.
///
/// Never fails: on an internal error [`EngagementMetrics::NEUTRAL`] is
/// returned and the error is logged.
pub fn simulate_engagement_metrics_with<R: Rng + ?Sized>(
    rng: &mut R,
    content: &str,
    seo_score: f64,
    strategy_id: usize,
) -> EngagementMetrics {
    match try_simulate(rng, content, seo_score, strategy_id) {
        Ok(metrics) => {
            info!(
                ctr = metrics.ctr,
                time_on_page = metrics.time_on_page,
                search_position = metrics.search_position,
                bounce_rate = metrics.bounce_rate,
                "engagement metrics simulated"
            );
            metrics
        }
        Err(err) => {
            error!(error = %err, "error simulating engagement metrics");
            EngagementMetrics::NEUTRAL
        }
    }
}

fn try_simulate<R: Rng + ?Sized>(
    rng: &mut R,
    content: &str,
    seo_score: f64,
    strategy_id: usize,
) -> Result<EngagementMetrics> {
    if !seo_score.is_finite() {
        return Err(EngineError::Metrics(format!(
            "seo score must be finite, got {seo_score}"
        )));
    }
    let multiplier = STRATEGY_MULTIPLIERS
        .get(strategy_id)
        .unwrap_or(&STRATEGY_MULTIPLIERS[0]);
    let quality = seo_score / 100.0;

    let ctr = BASE_CTR * multiplier.ctr * quality * (1.0 + noise(rng, CTR_NOISE)?);
    let ctr = bounded(ctr, 0.001, 0.15, "ctr")?;

    #[allow(clippy::cast_precision_loss)]
    let word_count = content.split_whitespace().count() as f64;
    let reading_time = word_count / WORDS_PER_MINUTE * 60.0;
    let base_time = reading_time.max(MIN_BASE_TIME_SECS);
    let time_on_page = base_time * multiplier.time * quality * (1.0 + noise(rng, TIME_NOISE)?);
    let time_on_page = bounded(time_on_page, 10.0, 600.0, "time_on_page")?;

    let divisor = multiplier.position * quality;
    if divisor.abs() < f64::EPSILON {
        return Err(EngineError::Metrics(
            "search position undefined for zero quality".to_string(),
        ));
    }
    let search_position = BASE_POSITION / divisor * (1.0 + noise(rng, POSITION_NOISE)?);
    let search_position = bounded(search_position, 1.0, 50.0, "search_position")?;

    let bounce_rate =
        (BASE_BOUNCE * multiplier.bounce - 0.3 * quality) * (1.0 + noise(rng, BOUNCE_NOISE)?);
    let bounce_rate = bounded(bounce_rate, 0.2, 0.95, "bounce_rate")?;

    Ok(EngagementMetrics {
        ctr: round_to(ctr, 4),
        time_on_page: round_to(time_on_page, 1),
        search_position: round_to(search_position, 1),
        bounce_rate: round_to(bounce_rate, 3),
    })
}

fn noise<R: Rng + ?Sized>(rng: &mut R, std_dev: f64) -> Result<f64> {
    let normal = Normal::new(0.0, std_dev)
        .map_err(|err| EngineError::Metrics(format!("noise distribution: {err}")))?;
    Ok(normal.sample(rng))
}

fn bounded(value: f64, min: f64, max: f64, name: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value.clamp(min, max))
    } else {
        Err(EngineError::Metrics(format!("{name} is not finite")))
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
