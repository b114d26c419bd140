//! Pre-write validation gate for Method Cards.
//!
//! [`moderate`] decides whether a card may enter the store: non-empty task
//! intent, size limits, and a repeated-character spam check. Pure and
//! deterministic — the same card always gets the same verdict, and rejection
//! is a `false`, never an error.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::card::MethodCard;
use crate::config::ModerationLimits;

/// A task intent of at least this length with one character making up ≥ 90%
/// of it is treated as repeated-character flooding.
const SPAM_MIN_LEN: usize = 10;
const SPAM_CHAR_RATIO: f64 = 0.9;

/// Return `true` if the card is OK to persist.
///
/// Rules apply in order, short-circuiting on the first failure:
/// empty task intent, task intent / plan / context over their limits,
/// then the spam heuristic.
pub fn moderate(card: &MethodCard, limits: &ModerationLimits) -> bool {
    let task = card.task_intent.trim();
    if task.is_empty() {
        warn!("moderate: task_intent empty, rejected");
        return false;
    }
    if task.chars().count() > limits.max_task_intent {
        warn!(len = task.chars().count(), "moderate: task_intent too long");
        return false;
    }
    if card.plan.chars().count() > limits.max_plan {
        warn!(len = card.plan.chars().count(), "moderate: plan too long");
        return false;
    }
    if card.context.chars().count() > limits.max_context {
        warn!(len = card.context.chars().count(), "moderate: context too long");
        return false;
    }
    if is_repeated_char_spam(task) {
        warn!("moderate: task_intent looks like spam (repeated char)");
        return false;
    }
    debug!("moderate: passed");
    true
}

/// True when the single most frequent character accounts for ≥ 90% of a
/// sufficiently long string.
fn is_repeated_char_spam(text: &str) -> bool {
    let total = text.chars().count();
    if total < SPAM_MIN_LEN {
        return false;
    }
    let mut counts: HashMap<char, usize> = HashMap::new();
    for ch in text.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }
    let max = counts.values().copied().max().unwrap_or(0);
    max as f64 >= total as f64 * SPAM_CHAR_RATIO
}
