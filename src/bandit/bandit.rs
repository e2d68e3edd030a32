use std::path::Path;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::error::{EngineError, Result};

use super::state::{BanditSnapshot, HISTORY_CAP, HistoryRecord, validate_parameters};
use super::storage;
use super::types::{BanditStatistics, Decision, LoadOutcome, Selection};

/// Epsilon-greedy bandit over `n_arms` opaque arms.
///
/// The bandit owns its value and count buffers outright; callers only ever see
/// shared slices. Selection never mutates state, `update` is the only mutator
/// besides `reset` and `load_state`.
#[derive(Debug, Clone)]
pub struct Bandit {
    n_arms: usize,
    epsilon: f64,
    learning_rate: Option<f64>,
    q_values: Vec<f64>,
    action_counts: Vec<u64>,
    total_reward: f64,
    history: Vec<HistoryRecord>,
}

impl Bandit {
    /// Create a fresh bandit with all values and counts at zero.
    ///
    /// `learning_rate = None` selects the incremental sample-mean update.
    pub fn new(n_arms: usize, epsilon: f64, learning_rate: Option<f64>) -> Result<Self> {
        validate_parameters(n_arms, epsilon, learning_rate)?;
        info!(n_arms, epsilon, ?learning_rate, "initialized multi-armed bandit");
        Ok(Self {
            n_arms,
            epsilon,
            learning_rate,
            q_values: vec![0.0; n_arms],
            action_counts: vec![0; n_arms],
            total_reward: 0.0,
            history: Vec::new(),
        })
    }

    /// Build a bandit directly from a validated snapshot.
    pub fn from_snapshot(snapshot: BanditSnapshot) -> Result<Self> {
        snapshot.validate()?;
        Ok(Self {
            n_arms: snapshot.n_arms,
            epsilon: snapshot.epsilon,
            learning_rate: snapshot.learning_rate,
            q_values: snapshot.q_values,
            action_counts: snapshot.action_counts,
            total_reward: snapshot.total_reward,
            history: snapshot.history,
        })
    }

    #[must_use]
    pub const fn n_arms(&self) -> usize {
        self.n_arms
    }

    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[must_use]
    pub const fn learning_rate(&self) -> Option<f64> {
        self.learning_rate
    }

    #[must_use]
    pub fn q_values(&self) -> &[f64] {
        &self.q_values
    }

    #[must_use]
    pub fn action_counts(&self) -> &[u64] {
        &self.action_counts
    }

    #[must_use]
    pub const fn total_reward(&self) -> f64 {
        self.total_reward
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    #[must_use]
    pub fn total_actions(&self) -> u64 {
        self.action_counts.iter().sum()
    }

    /// Pick an arm with the thread-local RNG. See [`Bandit::select_action_with`].
    pub fn select_action(&self, force: Option<usize>) -> Result<usize> {
        self.select_action_with(&mut rand::rng(), force)
    }

    /// Pick an arm: `force` if given, otherwise a uniform arm with probability
    /// epsilon, otherwise the best arm.
    ///
    /// A forced arm outside `[0, n_arms)` is rejected with `InvalidArgument`.
    pub fn select_action_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        force: Option<usize>,
    ) -> Result<usize> {
        self.select_with(rng, force).map(|selection| selection.action)
    }

    /// Like [`Bandit::select_action`] but also reports how the arm was chosen.
    pub fn select(&self, force: Option<usize>) -> Result<Selection> {
        self.select_with(&mut rand::rng(), force)
    }

    pub fn select_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        force: Option<usize>,
    ) -> Result<Selection> {
        if let Some(action) = force {
            self.check_arm(action)?;
            debug!(action, "forced action");
            return Ok(Selection {
                action,
                decision: Decision::Manual,
            });
        }

        let best = self.get_best_action();
        let action = if rng.random::<f64>() < self.epsilon {
            let action = rng.random_range(0..self.n_arms);
            debug!(action, "exploration: uniform arm");
            action
        } else {
            debug!(action = best, q_value = self.q_values[best], "exploitation: best arm");
            best
        };

        let decision = if action == best {
            Decision::Exploitation
        } else {
            Decision::Exploration
        };
        Ok(Selection { action, decision })
    }

    /// Apply one observed reward to `action`.
    ///
    /// Nothing changes unless the updated value and running total are both
    /// finite, so the state always stays serialisable.
    pub fn update(&mut self, action: usize, reward: f64) -> Result<()> {
        self.check_arm(action)?;
        if !reward.is_finite() {
            return Err(EngineError::InvalidArgument(format!(
                "reward must be finite, got {reward}"
            )));
        }

        let count = self.action_counts[action] + 1;
        let old_value = self.q_values[action];
        #[allow(clippy::cast_precision_loss)]
        let new_value = match self.learning_rate {
            Some(rate) => old_value + rate * (reward - old_value),
            None => old_value + (reward - old_value) / count as f64,
        };
        let total_reward = self.total_reward + reward;
        if !new_value.is_finite() || !total_reward.is_finite() {
            return Err(EngineError::InvalidArgument(format!(
                "reward {reward} overflows arm {action} (q_value {new_value}, total {total_reward})"
            )));
        }

        self.action_counts[action] = count;
        self.q_values[action] = new_value;
        self.total_reward = total_reward;

        self.history.push(HistoryRecord {
            action,
            reward,
            q_value: new_value,
            count,
            timestamp: Utc::now(),
        });

        info!(action, reward, q_value = new_value, count, "updated arm");
        Ok(())
    }

    /// Arm with the highest value; ties go to the lowest index.
    #[must_use]
    pub fn get_best_action(&self) -> usize {
        let mut best = 0;
        for (idx, value) in self.q_values.iter().enumerate().skip(1) {
            if *value > self.q_values[best] {
                best = idx;
            }
        }
        best
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn get_statistics(&self) -> BanditStatistics {
        let total_actions = self.total_actions();
        let denominator = total_actions.max(1) as f64;
        let best_action = self.get_best_action();

        BanditStatistics {
            q_values: self.q_values.clone(),
            action_counts: self.action_counts.clone(),
            action_probabilities: self
                .action_counts
                .iter()
                .map(|count| *count as f64 / denominator)
                .collect(),
            total_reward: self.total_reward,
            avg_reward: self.total_reward / denominator,
            best_action,
            best_q_value: self.q_values[best_action],
            epsilon: self.epsilon,
            total_actions,
        }
    }

    /// Zero all learned state; arm count and hyperparameters are kept.
    pub fn reset(&mut self) {
        self.q_values = vec![0.0; self.n_arms];
        self.action_counts = vec![0; self.n_arms];
        self.total_reward = 0.0;
        self.history.clear();
        info!(n_arms = self.n_arms, "bandit reset to initial state");
    }

    /// Snapshot of the full state, with history trimmed to the newest
    /// [`HISTORY_CAP`] records.
    #[must_use]
    pub fn to_snapshot(&self) -> BanditSnapshot {
        let start = self.history.len().saturating_sub(HISTORY_CAP);
        BanditSnapshot {
            n_arms: self.n_arms,
            epsilon: self.epsilon,
            learning_rate: self.learning_rate,
            q_values: self.q_values.clone(),
            action_counts: self.action_counts.clone(),
            total_reward: self.total_reward,
            history: self.history[start..].to_vec(),
            last_updated: Some(Utc::now()),
        }
    }

    pub fn save_state(&self, path: &Path) -> Result<()> {
        storage::save_snapshot(path, &self.to_snapshot())?;
        info!(path = %path.display(), "bandit state saved");
        Ok(())
    }

    /// Replace the in-memory state with the snapshot at `path`.
    ///
    /// A missing file is a fresh start, not an error. Any other failure,
    /// including a snapshot built for a different arm count, is logged and
    /// returned while the current state stays untouched.
    pub fn load_state(&mut self, path: &Path) -> Result<LoadOutcome> {
        let snapshot = match storage::load_snapshot(path) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                warn!(path = %path.display(), "state file not found, using fresh initialization");
                return Ok(LoadOutcome::Missing);
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "error loading bandit state");
                return Err(err);
            }
        };

        if snapshot.n_arms != self.n_arms {
            let err = EngineError::DimensionMismatch {
                expected: self.n_arms,
                found: snapshot.n_arms,
            };
            error!(path = %path.display(), error = %err, "refusing bandit state");
            return Err(err);
        }

        if snapshot.epsilon.to_bits() != self.epsilon.to_bits()
            || snapshot.learning_rate.map(f64::to_bits) != self.learning_rate.map(f64::to_bits)
        {
            warn!(
                path = %path.display(),
                configured_epsilon = self.epsilon,
                configured_learning_rate = ?self.learning_rate,
                saved_epsilon = snapshot.epsilon,
                saved_learning_rate = ?snapshot.learning_rate,
                "saved hyperparameters override the configured ones; reset the state to apply new settings"
            );
        }

        let restored = Self::from_snapshot(snapshot).inspect_err(|err| {
            error!(path = %path.display(), error = %err, "refusing bandit state");
        })?;
        *self = restored;

        info!(
            path = %path.display(),
            total_actions = self.total_actions(),
            best_action = self.get_best_action(),
            "bandit state loaded"
        );
        Ok(LoadOutcome::Restored)
    }

    fn check_arm(&self, action: usize) -> Result<()> {
        if action >= self.n_arms {
            return Err(EngineError::InvalidArgument(format!(
                "arm {action} out of range [0, {})",
                self.n_arms
            )));
        }
        Ok(())
    }
}
