use std::path::PathBuf;

use seo_engine::config::Config;
use seo_engine::test_utils::fixtures::StateFixture;
use seo_engine::test_utils::{TestCase, run_table_tests};

#[test]
fn config_from_toml_documents() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "empty",
            input: "",
            expected: (5usize, 0.2f64, None::<f64>, 600usize),
        },
        TestCase {
            name: "bandit_only",
            input: "[bandit]\nn_arms = 8\nepsilon = 0.1\nlearning_rate = 0.25\n",
            expected: (8, 0.1, Some(0.25), 600),
        },
        TestCase {
            name: "metrics_only",
            input: "[metrics]\ndefault_target_length = 1500\n",
            expected: (5, 0.2, None, 1500),
        },
    ];

    run_table_tests(cases, |raw| {
        let config = Config::from_toml(raw).expect("parse config");
        config.validate().expect("valid config");
        (
            config.bandit.n_arms,
            config.bandit.epsilon,
            config.bandit.learning_rate,
            config.metrics.default_target_length,
        )
    })
}

#[test]
fn invalid_documents_are_rejected() {
    assert!(Config::from_toml("[bandit]\nn_arms = \"five\"\n").is_err());
    let config = Config::from_toml("[bandit]\nn_arms = 0\n").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn settings_build_a_bandit() {
    let fixture = StateFixture::new();
    let raw = format!(
        "[bandit]\nn_arms = 3\nstate_path = {:?}\n",
        fixture.state_path.display().to_string()
    );
    let config = Config::from_toml(&raw).unwrap();
    let bandit = config.bandit.build().unwrap();
    assert_eq!(bandit.n_arms(), 3);
    assert_eq!(
        config.bandit.resolved_state_path(),
        PathBuf::from(&fixture.state_path)
    );
}
