//! Value types returned by the bandit.

use serde::{Deserialize, Serialize};

/// How an arm came to be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The caller forced the arm.
    Manual,
    /// The policy picked an arm other than the current best.
    Exploration,
    /// The policy picked the current best arm.
    Exploitation,
}

impl Decision {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Exploration => "RL - Exploration",
            Self::Exploitation => "RL - Exploitation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub action: usize,
    pub decision: Decision,
}

/// Read-only summary derived from the current bandit state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanditStatistics {
    pub q_values: Vec<f64>,
    pub action_counts: Vec<u64>,
    /// Share of all updates that went to each arm; all zero before the first update.
    pub action_probabilities: Vec<f64>,
    pub total_reward: f64,
    pub avg_reward: f64,
    pub best_action: usize,
    pub best_q_value: f64,
    pub epsilon: f64,
    pub total_actions: u64,
}

/// Result of restoring state from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// A snapshot was found and adopted.
    Restored,
    /// No snapshot exists yet; the in-memory state was left as is.
    Missing,
}
