mod helpers;

use helpers::{card, file_only_config, store, ts};
use playbook::ranking::{recent, search};

#[test]
fn recent_orders_by_upvotes_then_score_then_recency() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    // Deliberately saved out of rank order
    store.save(&card("low upvotes high score", 9.5, 1, &ts(10)));
    store.save(&card("top upvotes", 4.0, 5, &ts(0)));
    store.save(&card("upvote tie lower score", 6.0, 3, &ts(30)));
    store.save(&card("upvote tie older", 8.0, 3, &ts(5)));
    store.save(&card("upvote tie newer", 8.0, 3, &ts(20)));

    let results = recent(&store, 10);
    assert_eq!(results.len(), 5);

    // Pairwise ordering invariant
    for pair in results.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.upvotes > b.upvotes
                || (a.upvotes == b.upvotes && a.outcome_score > b.outcome_score)
                || (a.upvotes == b.upvotes
                    && a.outcome_score == b.outcome_score
                    && a.timestamp >= b.timestamp),
            "{} should not precede {}",
            a.task_intent,
            b.task_intent
        );
    }

    assert_eq!(results[0].task_intent, "top upvotes");
    assert_eq!(results[1].task_intent, "upvote tie newer");
    assert_eq!(results[2].task_intent, "upvote tie older");
    assert_eq!(results[3].task_intent, "upvote tie lower score");
    assert_eq!(results[4].task_intent, "low upvotes high score");
}

#[test]
fn search_matches_are_substring_hits() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    store.save(&card("Explain recursion to a beginner", 8.0, 2, &ts(0)));
    store.save(&card("Summarize a paragraph", 7.0, 1, &ts(1)));
    let mut tagged = card("Draft an email", 6.0, 0, &ts(2));
    tagged.tags = vec!["recursion".into(), "writing".into()];
    store.save(&tagged);

    let results = search(&store, "recursion", 10, &config.retrieval);
    assert_eq!(results.len(), 2);
    for c in &results {
        let haystack = format!("{} {} {}", c.task_intent, c.plan, c.tags.join(",")).to_lowercase();
        assert!(haystack.contains("recursion"), "{}", c.task_intent);
    }
}

#[test]
fn search_is_case_insensitive() {
    let (_dir, config) = file_only_config();
    let store = store(&config);
    store.save(&card("Explain RECURSION simply", 8.0, 0, &ts(0)));

    let results = search(&store, "Recursion", 5, &config.retrieval);
    assert_eq!(results.len(), 1);
}

#[test]
fn search_preserves_rank_order_and_respects_top_n() {
    let (_dir, config) = file_only_config();
    let store = store(&config);

    store.save(&card("shared topic one", 5.0, 1, &ts(0)));
    store.save(&card("shared topic two", 5.0, 3, &ts(1)));
    store.save(&card("shared topic three", 5.0, 2, &ts(2)));

    let results = search(&store, "shared topic", 2, &config.retrieval);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].task_intent, "shared topic two");
    assert_eq!(results[1].task_intent, "shared topic three");
}

#[test]
fn blank_query_returns_empty_immediately() {
    let (_dir, config) = file_only_config();
    let store = store(&config);
    store.save(&card("anything", 5.0, 0, &ts(0)));

    assert!(search(&store, "", 5, &config.retrieval).is_empty());
    assert!(search(&store, "   ", 5, &config.retrieval).is_empty());
}

#[test]
fn unmatched_query_returns_empty_not_error() {
    let (_dir, config) = file_only_config();
    let store = store(&config);
    store.save(&card("anything", 5.0, 0, &ts(0)));

    // Caller decides whether to chain to recent()
    assert!(search(&store, "zzz-no-match", 5, &config.retrieval).is_empty());
    assert_eq!(recent(&store, 5).len(), 1);
}
