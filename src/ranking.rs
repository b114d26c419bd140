//! Keyword search and top-N retrieval over the card store.
//!
//! Two modes: [`search`] filters a ranked candidate superset by substring
//! match, [`recent`] is the no-query cold-start path. Both order by the
//! composite key — upvotes, then outcome score, then recency — so
//! community-endorsed methods outrank merely high-scoring ones, which
//! outrank merely recent ones.
//!
//! When a query matches nothing, falling back to [`recent`] is the caller's
//! decision, not ours — callers apply their own fallback policy (the limits
//! usually differ between the two).

use std::cmp::Ordering;
use tracing::debug;

use crate::card::MethodCard;
use crate::config::RetrievalConfig;
use crate::store::CardStore;

/// Composite ranking key: `upvotes DESC, outcome_score DESC, timestamp DESC`.
pub fn composite_order(a: &MethodCard, b: &MethodCard) -> Ordering {
    b.upvotes
        .cmp(&a.upvotes)
        .then_with(|| b.outcome_score.total_cmp(&a.outcome_score))
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

/// Keyword search: fetch the top candidates by composite order, keep those
/// whose `task_intent + plan + tags` contains the lowercased query, preserve
/// fetch order, return the first `top_n`.
///
/// An empty or whitespace query returns empty immediately — this is a keyword
/// search, not a "best overall" query; use [`recent`] for that.
pub fn search(
    store: &CardStore,
    query: &str,
    top_n: usize,
    retrieval: &RetrievalConfig,
) -> Vec<MethodCard> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let results: Vec<MethodCard> = store
        .query_ranked(retrieval.search_candidate_limit)
        .into_iter()
        .filter(|card| card.search_text().contains(&needle))
        .take(top_n)
        .collect();
    debug!(
        query = %needle.chars().take(50).collect::<String>(),
        found = results.len(),
        "search complete"
    );
    results
}

/// Top `top_n` cards by composite order, no text filter. The cold-start path
/// when there is no query (or when a search came back empty).
pub fn recent(store: &CardStore, top_n: usize) -> Vec<MethodCard> {
    if top_n == 0 {
        return Vec::new();
    }
    let results = store.query_ranked(top_n);
    debug!(top_n, found = results.len(), "recent complete");
    results
}
