//! Baseline card seeding.
//!
//! A cold store would make every early retrieval useless, so a fixed set of
//! known-good playbooks is planted once. [`ensure_baseline`] is idempotent:
//! cards are matched by exact `task_intent`, and a second run adds nothing.

use tracing::{info, warn};

use crate::card::{CardDraft, MethodCard};
use crate::store::CardStore;

struct BaselineCard {
    task_intent: &'static str,
    plan: &'static str,
    mistakes: &'static str,
    fixes: &'static str,
    outcome_score: f64,
    upvotes: i64,
    tags: &'static [&'static str],
}

const BASELINE_CARDS: &[BaselineCard] = &[
    BaselineCard {
        task_intent: "Explain recursion in 3 sentences for a beginner",
        plan: "Output exactly 3 sentences. Sentence 1: Define recursion (a function that calls itself). Sentence 2: One simple example (e.g. factorial or countdown). Sentence 3: One real-world analogy (e.g. Russian dolls or folders). Use plain language; no jargon like 'base case' or 'stack'.",
        mistakes: "More than 3 sentences; technical jargon; vague or abstract.",
        fixes: "Exactly 3 sentences. Use 'calls itself'. Give a concrete example and a clear analogy.",
        outcome_score: 8.5,
        upvotes: 3,
        tags: &["explanation", "recursion", "beginner", "sentences"],
    },
    BaselineCard {
        task_intent: "Summarize a paragraph in 2 or 3 sentences",
        plan: "Identify the main idea in one sentence. Add 1-2 supporting points in the next sentence(s). Use your own words. Do not copy phrases. Total: 2-3 sentences only.",
        mistakes: "Copy-pasting; adding new ideas not in the text; writing more than 3 sentences.",
        fixes: "Paraphrase. Only what is in the paragraph. Keep it short.",
        outcome_score: 8.0,
        upvotes: 2,
        tags: &["summary", "writing", "paragraph"],
    },
    BaselineCard {
        task_intent: "Write a hello-world program",
        plan: "One minimal file. One print or echo statement. One line saying how to run it (e.g. 'Run: python file.py'). No extra setup or comments unless one line.",
        mistakes: "Multiple files; complex setup; no run instruction.",
        fixes: "Single file, one command to run, minimal code.",
        outcome_score: 8.0,
        upvotes: 2,
        tags: &["code", "hello-world", "beginner"],
    },
    BaselineCard {
        task_intent: "Explain a concept in simple terms",
        plan: "Start with a one-sentence definition. Then one short example. Then one everyday analogy. Use simple words. Avoid jargon; if you use a term, explain it.",
        mistakes: "Assuming prior knowledge; long paragraphs; no example or analogy.",
        fixes: "Define, example, analogy. Short sentences. Plain language.",
        outcome_score: 7.5,
        upvotes: 1,
        tags: &["explanation", "simple", "beginner"],
    },
    BaselineCard {
        task_intent: "Give step-by-step instructions",
        plan: "Number the steps. One action per step. Start with what you need. End with how to verify. Keep each step to one short sentence.",
        mistakes: "Combining steps; skipping prerequisites; vague verbs.",
        fixes: "Numbered list. One clear action per step. Include 'you need' and 'to verify'.",
        outcome_score: 7.5,
        upvotes: 1,
        tags: &["instructions", "steps", "howto"],
    },
];

/// Save every baseline card whose exact `task_intent` is not already present
/// in either backend. Returns the number added; a second run returns 0.
pub fn ensure_baseline(store: &CardStore) -> usize {
    let existing = store.task_intents();
    let mut added = 0;
    for template in BASELINE_CARDS {
        if existing.contains(template.task_intent) {
            continue;
        }
        let card = MethodCard::build(CardDraft {
            task_intent: template.task_intent.to_string(),
            plan: template.plan.to_string(),
            mistakes: template.mistakes.to_string(),
            fixes: template.fixes.to_string(),
            outcome_score: template.outcome_score,
            upvotes: template.upvotes,
            tags: template.tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        });
        if store.save(&card) {
            added += 1;
        } else {
            warn!(task_intent = template.task_intent, "failed to seed baseline card");
        }
    }
    info!(added, "baseline seeding complete");
    added
}
