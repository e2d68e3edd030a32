use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bandit::Bandit;
use crate::bandit::state::validate_parameters;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bandit: BanditSettings,
    #[serde(default)]
    pub metrics: MetricsSettings,
}

impl Config {
    /// Defaults, then the explicit file (or `SEO_ENGINE_CONFIG`, or the global
    /// config file), then `SEO_ENGINE_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SEO_ENGINE_CONFIG").ok().map(PathBuf::from));

        let patch = match explicit {
            Some(path) => Self::load_patch(&path)?,
            None => Self::load_global()?,
        };
        if let Some(patch) = patch {
            config.merge_patch(patch);
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document layered over the defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| EngineError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("seo-engine/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| EngineError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| EngineError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.bandit {
            self.bandit.merge(patch);
        }
        if let Some(patch) = patch.metrics {
            self.metrics.merge(patch);
        }
    }

    /// Apply overrides from `lookup` (the process environment in [`Config::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_var::<usize>(&lookup, "SEO_ENGINE_ARMS")? {
            self.bandit.n_arms = value;
        }
        if let Some(value) = parse_var::<f64>(&lookup, "SEO_ENGINE_EPSILON")? {
            self.bandit.epsilon = value;
        }
        if let Some(value) = lookup("SEO_ENGINE_LEARNING_RATE") {
            self.bandit.learning_rate = parse_learning_rate(&value)?;
        }
        if let Some(value) = lookup("SEO_ENGINE_STATE_PATH") {
            self.bandit.state_path = Some(PathBuf::from(value));
        }
        if let Some(value) = parse_var::<usize>(&lookup, "SEO_ENGINE_TARGET_LENGTH")? {
            self.metrics.default_target_length = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate_parameters(self.bandit.n_arms, self.bandit.epsilon, self.bandit.learning_rate)
            .map_err(|err| EngineError::Config(format!("bandit settings: {err}")))?;

        let metrics = &self.metrics;
        if metrics.min_target_length > metrics.max_target_length {
            return Err(EngineError::Config(format!(
                "min_target_length {} exceeds max_target_length {}",
                metrics.min_target_length, metrics.max_target_length
            )));
        }
        metrics.check_target_length(metrics.default_target_length)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanditSettings {
    #[serde(default)]
    pub n_arms: usize,
    #[serde(default)]
    pub epsilon: f64,
    #[serde(default)]
    pub learning_rate: Option<f64>,
    /// Where state is persisted; `None` means the platform data directory.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

impl Default for BanditSettings {
    fn default() -> Self {
        Self {
            n_arms: 5,
            epsilon: 0.2,
            learning_rate: None,
            state_path: None,
        }
    }
}

impl BanditSettings {
    fn merge(&mut self, patch: BanditPatch) {
        if let Some(value) = patch.n_arms {
            self.n_arms = value;
        }
        if let Some(value) = patch.epsilon {
            self.epsilon = value;
        }
        if let Some(value) = patch.learning_rate {
            self.learning_rate = Some(value);
        }
        if let Some(value) = patch.state_path {
            self.state_path = Some(value);
        }
    }

    #[must_use]
    pub fn resolved_state_path(&self) -> PathBuf {
        self.state_path.clone().unwrap_or_else(default_state_path)
    }

    /// Fresh bandit from these settings.
    pub fn build(&self) -> Result<Bandit> {
        Bandit::new(self.n_arms, self.epsilon, self.learning_rate)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSettings {
    #[serde(default)]
    pub default_target_length: usize,
    #[serde(default)]
    pub min_target_length: usize,
    #[serde(default)]
    pub max_target_length: usize,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            default_target_length: 600,
            min_target_length: 100,
            max_target_length: 3000,
        }
    }
}

impl MetricsSettings {
    fn merge(&mut self, patch: MetricsPatch) {
        if let Some(value) = patch.default_target_length {
            self.default_target_length = value;
        }
        if let Some(value) = patch.min_target_length {
            self.min_target_length = value;
        }
        if let Some(value) = patch.max_target_length {
            self.max_target_length = value;
        }
    }

    pub fn check_target_length(&self, target_length: usize) -> Result<usize> {
        if (self.min_target_length..=self.max_target_length).contains(&target_length) {
            Ok(target_length)
        } else {
            Err(EngineError::Config(format!(
                "target length {target_length} outside [{}, {}]",
                self.min_target_length, self.max_target_length
            )))
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub bandit: Option<BanditPatch>,
    pub metrics: Option<MetricsPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BanditPatch {
    pub n_arms: Option<usize>,
    pub epsilon: Option<f64>,
    pub learning_rate: Option<f64>,
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MetricsPatch {
    pub default_target_length: Option<usize>,
    pub min_target_length: Option<usize>,
    pub max_target_length: Option<usize>,
}

#[must_use]
pub fn default_state_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("seo-engine").join("agent_state.json")
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| EngineError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

/// `none` or an empty value selects the sample-mean update.
fn parse_learning_rate(value: &str) -> Result<Option<f64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed.parse::<f64>().map(Some).map_err(|err| {
        EngineError::Config(format!(
            "invalid SEO_ENGINE_LEARNING_RATE value {value}: {err}"
        ))
    })
}
