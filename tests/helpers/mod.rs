#![allow(dead_code)]

use playbook::card::{CardDraft, MethodCard};
use playbook::config::PlaybookConfig;
use playbook::store::CardStore;
use tempfile::TempDir;

/// Config with no durable backend and a fallback file inside a fresh temp
/// directory. Keep the returned `TempDir` alive for the test's duration.
pub fn file_only_config() -> (TempDir, PlaybookConfig) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = PlaybookConfig::default();
    config.backend.host = String::new();
    config.storage.cards_file = dir
        .path()
        .join("method_cards.json")
        .to_string_lossy()
        .into_owned();
    (dir, config)
}

/// Config pointing the durable backend at a closed local port, so every
/// durable attempt fails fast with connection refused.
pub fn unreachable_backend_config() -> (TempDir, PlaybookConfig) {
    let (dir, mut config) = file_only_config();
    config.backend.host = "127.0.0.1".into();
    config.backend.port = Some(1);
    config.backend.timeout_secs = 2;
    (dir, config)
}

pub fn store(config: &PlaybookConfig) -> CardStore {
    CardStore::new(config)
}

/// Build a card with explicit ranking signals and a deterministic timestamp.
pub fn card(task_intent: &str, outcome_score: f64, upvotes: i64, timestamp: &str) -> MethodCard {
    let mut c = MethodCard::build(CardDraft {
        task_intent: task_intent.into(),
        plan: format!("How to handle: {task_intent}"),
        outcome_score,
        upvotes,
        ..Default::default()
    });
    c.timestamp = timestamp.into();
    c
}

/// Minute-granularity timestamps that sort lexicographically with `seq`.
pub fn ts(seq: usize) -> String {
    format!("2024-05-01T{:02}:{:02}:00+00:00", seq / 60, seq % 60)
}
