use std::fs;

use seo_engine::EngineError;
use seo_engine::bandit::{Bandit, HISTORY_CAP, LoadOutcome};
use seo_engine::test_utils::fixtures::StateFixture;

#[test]
fn save_then_load_round_trips() {
    let fixture = StateFixture::new();
    let mut saved = Bandit::new(5, 0.25, None).unwrap();
    for (arm, reward) in [(0, 0.31), (2, 0.77), (2, 0.64), (4, 0.12)] {
        saved.update(arm, reward).unwrap();
    }
    saved.save_state(&fixture.state_path).unwrap();

    let mut restored = Bandit::new(5, 0.25, None).unwrap();
    assert_eq!(
        restored.load_state(&fixture.state_path).unwrap(),
        LoadOutcome::Restored
    );
    assert_close(restored.q_values(), saved.q_values());
    assert_eq!(restored.action_counts(), saved.action_counts());
    assert!((restored.total_reward() - saved.total_reward()).abs() < 1e-12);
    assert_eq!(restored.history().len(), saved.history().len());
    for (a, b) in restored.history().iter().zip(saved.history()) {
        assert_eq!((a.action, a.count, a.timestamp), (b.action, b.count, b.timestamp));
        assert!((a.reward - b.reward).abs() < 1e-12);
    }
    assert_eq!(restored.get_best_action(), saved.get_best_action());
}

fn assert_close(left: &[f64], right: &[f64]) {
    assert_eq!(left.len(), right.len());
    for (l, r) in left.iter().zip(right) {
        assert!((l - r).abs() < 1e-12, "{l} != {r}");
    }
}

#[test]
fn saved_history_keeps_most_recent_entries() {
    let fixture = StateFixture::new();
    let mut bandit = Bandit::new(2, 0.2, Some(0.5)).unwrap();
    for i in 0..(HISTORY_CAP + 250) {
        bandit.update(i % 2, 0.5).unwrap();
    }
    bandit.save_state(&fixture.state_path).unwrap();

    let mut restored = Bandit::new(2, 0.2, Some(0.5)).unwrap();
    restored.load_state(&fixture.state_path).unwrap();
    assert_eq!(restored.history().len(), HISTORY_CAP);
    let kept: Vec<u64> = restored.history().iter().map(|r| r.count).collect();
    let expected: Vec<u64> = bandit.history()[250..].iter().map(|r| r.count).collect();
    assert_eq!(kept, expected);
    assert_eq!(
        restored.action_counts().iter().sum::<u64>(),
        (HISTORY_CAP + 250) as u64
    );
}

#[test]
fn missing_file_is_fresh_start() {
    let fixture = StateFixture::new();
    let mut bandit = Bandit::new(3, 0.2, None).unwrap();
    bandit.update(1, 0.4).unwrap();
    assert_eq!(
        bandit.load_state(&fixture.state_path).unwrap(),
        LoadOutcome::Missing
    );
    assert_eq!(bandit.action_counts(), &[0, 1, 0]);
}

#[test]
fn mismatched_arm_count_is_rejected() {
    let fixture = StateFixture::new();
    let mut three = Bandit::new(3, 0.2, None).unwrap();
    three.update(0, 0.9).unwrap();
    three.save_state(&fixture.state_path).unwrap();

    let mut five = Bandit::new(5, 0.2, None).unwrap();
    five.update(4, 0.3).unwrap();
    let err = five.load_state(&fixture.state_path).unwrap_err();
    assert!(matches!(
        err,
        EngineError::DimensionMismatch {
            expected: 5,
            found: 3
        }
    ));
    assert_eq!(five.n_arms(), 5);
    assert_eq!(five.action_counts(), &[0, 0, 0, 0, 1]);
}

#[test]
fn corrupt_file_leaves_state_untouched() {
    let fixture = StateFixture::new();
    let path = fixture.create_file("corrupt.json", "{\"n_arms\": 5, \"q_values\": [");
    let mut bandit = Bandit::new(5, 0.2, None).unwrap();
    bandit.update(2, 0.6).unwrap();
    let before = (bandit.q_values().to_vec(), bandit.action_counts().to_vec());

    assert!(matches!(
        bandit.load_state(&path),
        Err(EngineError::Serialization(_))
    ));
    assert_eq!((bandit.q_values().to_vec(), bandit.action_counts().to_vec()), before);
}

#[test]
fn inconsistent_snapshot_is_rejected() {
    let fixture = StateFixture::new();
    let path = fixture.create_file(
        "short.json",
        r#"{"n_arms": 2, "epsilon": 0.2, "q_values": [0.5],
            "action_counts": [1, 0], "total_reward": 0.5}"#,
    );
    let mut bandit = Bandit::new(2, 0.2, None).unwrap();
    assert!(bandit.load_state(&path).is_err());
    assert_eq!(bandit.total_actions(), 0);
}

#[test]
fn loads_legacy_state_file() {
    let fixture = StateFixture::new();
    let path = fixture.create_file(
        "agent_state.json",
        r#"{
  "n_arms": 5,
  "epsilon": 0.2,
  "learning_rate": null,
  "q_values": [0.0, 0.61, 0.0, 0.0, 0.0],
  "action_counts": [0.0, 1.0, 0.0, 0.0, 0.0],
  "total_reward": 0.61,
  "history": [
    {"action": 1, "reward": 0.61, "q_value": 0.61, "count": 1,
     "timestamp": "2025-01-15T09:30:00.123456"}
  ],
  "last_updated": "2025-01-15T09:30:00.200000"
}"#,
    );
    let mut bandit = Bandit::new(5, 0.2, None).unwrap();
    assert_eq!(bandit.load_state(&path).unwrap(), LoadOutcome::Restored);
    assert_eq!(bandit.get_best_action(), 1);
    assert_eq!(bandit.action_counts()[1], 1);

    // Re-saving writes integer counts.
    bandit.save_state(&path).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["action_counts"][1], serde_json::json!(1));
    assert!(raw["last_updated"].is_string());
}

#[test]
fn overflowing_rewards_keep_the_file_loadable() {
    let fixture = StateFixture::new();
    let mut bandit = Bandit::new(2, 0.2, None).unwrap();
    bandit.update(0, f64::MAX).unwrap();
    assert!(matches!(
        bandit.update(1, f64::MAX),
        Err(EngineError::InvalidArgument(_))
    ));
    bandit.save_state(&fixture.state_path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&fixture.state_path).unwrap()).unwrap();
    assert!(raw["total_reward"].is_f64());
    assert!(raw["q_values"].as_array().unwrap().iter().all(serde_json::Value::is_f64));

    let mut reloaded = Bandit::new(2, 0.2, None).unwrap();
    assert_eq!(
        reloaded.load_state(&fixture.state_path).unwrap(),
        LoadOutcome::Restored
    );
    assert_eq!(reloaded.action_counts(), &[1, 0]);
    assert!(reloaded.total_reward().is_finite());
    reloaded.update(1, 0.5).unwrap();
    reloaded.save_state(&fixture.state_path).unwrap();
}

#[test]
fn saved_hyperparameters_win_over_configured_ones() {
    let fixture = StateFixture::new();
    let mut saved = Bandit::new(3, 0.1, Some(0.25)).unwrap();
    saved.update(0, 0.5).unwrap();
    saved.save_state(&fixture.state_path).unwrap();

    let mut configured = Bandit::new(3, 0.9, None).unwrap();
    configured.load_state(&fixture.state_path).unwrap();
    assert!((configured.epsilon() - 0.1).abs() < f64::EPSILON);
    assert_eq!(configured.learning_rate(), Some(0.25));

    configured.reset();
    assert!((configured.epsilon() - 0.1).abs() < f64::EPSILON);
}
