//! seo-engine - adaptive strategy selection for SEO content generation.
//!
//! An epsilon-greedy [`bandit::Bandit`] chooses which writing strategy (an
//! opaque arm index) to use next; [`metrics`] turns the produced text into a
//! bounded reward that is fed back to the bandit.

pub mod app;
pub mod bandit;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod test_utils;

pub use error::{EngineError, Result};
