mod helpers;

use helpers::{card, file_only_config, store, ts};
use playbook::card::{CardDraft, MethodCard, ToolCalls};
use playbook::ranking;

#[test]
fn save_then_recent_returns_full_card() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    let saved = MethodCard::build(CardDraft {
        task_intent: "Review a pull request".into(),
        context: "large diff".into(),
        plan: "Read the description first, then the tests".into(),
        tool_calls: ToolCalls::Structured(vec![serde_json::json!({"tool": "diff"})]),
        mistakes: "Skimming the tests".into(),
        fixes: "Always open the test files".into(),
        outcome_score: 7.0,
        tags: vec!["review".into(), "code".into()],
        ..Default::default()
    });
    assert!(store.save(&saved));

    let results = ranking::recent(&store, 1);
    assert_eq!(results.len(), 1);
    let got = &results[0];
    assert_eq!(got.id, saved.id);
    assert_eq!(got.timestamp, saved.timestamp);
    assert_eq!(got.task_intent, "Review a pull request");
    assert_eq!(got.context, "large diff");
    assert_eq!(got.plan, "Read the description first, then the tests");
    assert!(got.tool_calls.contains("diff"));
    assert_eq!(got.mistakes, "Skimming the tests");
    assert_eq!(got.fixes, "Always open the test files");
    assert_eq!(got.outcome_score, 7.0);
    assert_eq!(got.upvotes, 0);
    assert_eq!(got.tags, vec!["review", "code"]);
}

#[test]
fn retention_cap_keeps_100_most_recent() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    for i in 0..150 {
        let c = card(&format!("task {i}"), 5.0, 0, &ts(i));
        assert!(store.save(&c));
    }

    // Fetch everything the fallback still holds
    let all = store.query_ranked(1000);
    assert_eq!(all.len(), 100);

    // Exactly the 100 most recent (seq 50..150) survive
    let oldest_kept = ts(50);
    for c in &all {
        assert!(
            c.timestamp >= oldest_kept,
            "card {} with timestamp {} should have been truncated",
            c.task_intent,
            c.timestamp
        );
    }
}

#[test]
fn upvote_k_times_adds_exactly_k() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    let c = card("upvotable", 6.0, 0, &ts(0));
    store.save(&c);

    for _ in 0..3 {
        assert!(store.increment_upvote(&c.id));
    }

    let results = ranking::recent(&store, 1);
    assert_eq!(results[0].upvotes, 3);
}

#[test]
fn upvote_unknown_id_is_false_and_mutates_nothing() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    let c = card("stable", 6.0, 2, &ts(0));
    store.save(&c);

    assert!(!store.increment_upvote("missing-id"));
    assert!(!store.increment_upvote(""));
    assert!(!store.increment_upvote("   "));

    let results = ranking::recent(&store, 1);
    assert_eq!(results[0].upvotes, 2);
}

#[test]
fn query_ranked_on_empty_store_is_empty() {
    let (_dir, config) = file_only_config();
    let store = store(&config);
    assert!(store.query_ranked(5).is_empty());
}
