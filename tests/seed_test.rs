mod helpers;

use helpers::{card, file_only_config, store, ts};
use playbook::ranking::{recent, search};
use playbook::seed::ensure_baseline;

#[test]
fn seeding_is_idempotent() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    assert_eq!(ensure_baseline(&store), 5);
    assert_eq!(ensure_baseline(&store), 0);
    assert_eq!(recent(&store, 10).len(), 5);
}

#[test]
fn seeding_skips_already_present_task_intents() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    store.save(&card(
        "Write a hello-world program",
        5.0,
        0,
        &ts(0),
    ));

    assert_eq!(ensure_baseline(&store), 4);
    assert_eq!(recent(&store, 10).len(), 5);
}

#[test]
fn seeded_store_answers_the_recursion_query() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    ensure_baseline(&store);

    let results = search(&store, "recursion", 3, &config.retrieval);
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].task_intent,
        "Explain recursion in 3 sentences for a beginner"
    );
}

#[test]
fn seeded_cards_rank_by_upvotes() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    ensure_baseline(&store);

    let results = recent(&store, 5);
    assert_eq!(
        results[0].task_intent,
        "Explain recursion in 3 sentences for a beginner"
    );
    assert_eq!(results[0].upvotes, 3);
}
