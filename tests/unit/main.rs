//! Unit-level integration tests for the public library surface.

mod config_tests;
mod metrics_tests;
mod persistence_tests;
