//! Persisted form of the bandit.
//!
//! Older state files store `action_counts` as floats (`5.0`) and write history
//! timestamps without an offset. Both are accepted on read; writes always use
//! integer counts and RFC 3339 timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, Result};

/// Maximum number of history records written to a snapshot.
pub const HISTORY_CAP: usize = 1000;

/// One applied update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub action: usize,
    pub reward: f64,
    /// Q-value of `action` after the update.
    pub q_value: f64,
    /// Selection count of `action` after the update.
    pub count: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanditSnapshot {
    pub n_arms: usize,
    pub epsilon: f64,
    #[serde(default)]
    pub learning_rate: Option<f64>,
    pub q_values: Vec<f64>,
    #[serde(deserialize_with = "deserialize_counts")]
    pub action_counts: Vec<u64>,
    pub total_reward: f64,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl BanditSnapshot {
    /// Check internal consistency before a snapshot replaces live state.
    pub fn validate(&self) -> Result<()> {
        validate_parameters(self.n_arms, self.epsilon, self.learning_rate)?;
        if self.q_values.len() != self.n_arms {
            return Err(EngineError::DimensionMismatch {
                expected: self.n_arms,
                found: self.q_values.len(),
            });
        }
        if self.action_counts.len() != self.n_arms {
            return Err(EngineError::DimensionMismatch {
                expected: self.n_arms,
                found: self.action_counts.len(),
            });
        }
        if self.q_values.iter().any(|q| !q.is_finite()) || !self.total_reward.is_finite() {
            return Err(EngineError::Serialization(
                "snapshot contains non-finite values".to_string(),
            ));
        }
        if let Some(record) = self.history.iter().find(|r| r.action >= self.n_arms) {
            return Err(EngineError::Serialization(format!(
                "history references arm {} of {}",
                record.action, self.n_arms
            )));
        }
        Ok(())
    }
}

/// Shared validation for constructor arguments and restored snapshots.
pub(crate) fn validate_parameters(
    n_arms: usize,
    epsilon: f64,
    learning_rate: Option<f64>,
) -> Result<()> {
    if n_arms < 1 {
        return Err(EngineError::Configuration(
            "n_arms must be at least 1".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&epsilon) {
        return Err(EngineError::Configuration(format!(
            "epsilon must be in [0, 1], got {epsilon}"
        )));
    }
    if let Some(rate) = learning_rate {
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(EngineError::Configuration(format!(
                "learning_rate must be in (0, 1], got {rate}"
            )));
        }
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(u64),
    Float(f64),
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn deserialize_counts<'de, D>(deserializer: D) -> std::result::Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawCount>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|count| match count {
            RawCount::Int(n) => Ok(n),
            RawCount::Float(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
            RawCount::Float(f) => Err(D::Error::custom(format!("invalid action count {f}"))),
        })
        .collect()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc()))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp {raw:?}")))
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp {raw:?}"))),
    }
}
