//! Property tests for the bandit and the metrics pipeline.

mod metrics_properties;
