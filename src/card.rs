//! The Method Card record and its factory.
//!
//! Defines [`MethodCard`] (the sole persisted entity), [`ToolCalls`] (the
//! tagged input type for the tool-call trace), and [`CardDraft`] (the factory
//! input). Construction is pure — validation belongs to the
//! [moderation gate](crate::moderation).

use serde::{Deserialize, Serialize};

/// A persisted playbook: one task, one recommended method, its known failure
/// modes, and how well the run that produced it scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCard {
    /// UUID v4, globally unique, immutable after creation.
    pub id: String,
    /// RFC 3339 UTC creation timestamp, set once.
    pub timestamp: String,
    /// Short description of the task this card addresses.
    pub task_intent: String,
    /// Free-form situational notes.
    #[serde(default)]
    pub context: String,
    /// The recommended methodology/steps.
    #[serde(default)]
    pub plan: String,
    /// Serialized record of tool invocations from the originating run.
    /// Stored as an opaque string; structured input is JSON-encoded once
    /// at the factory boundary.
    #[serde(default)]
    pub tool_calls: String,
    /// Known failure modes for this task type.
    #[serde(default)]
    pub mistakes: String,
    /// Corrective guidance.
    #[serde(default)]
    pub fixes: String,
    /// Judged quality of the originating run, in `[0.0, 10.0]`.
    #[serde(default)]
    pub outcome_score: f64,
    /// Successful-reuse count. Starts at 0 (or a seeded value) and only ever
    /// increases via [`CardStore::increment_upvote`](crate::store::CardStore::increment_upvote).
    #[serde(default)]
    pub upvotes: i64,
    /// Free-form categorization, insertion-ordered. Part of the keyword
    /// search surface.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Tool-call trace input accepted by the factory.
///
/// The originating run may hand over either free text or a structured
/// sequence of calls; both normalize to a single stored string.
#[derive(Debug, Clone)]
pub enum ToolCalls {
    /// Free text, stored verbatim.
    Raw(String),
    /// Structured call records, JSON-encoded into the stored string.
    Structured(Vec<serde_json::Value>),
}

impl Default for ToolCalls {
    fn default() -> Self {
        Self::Raw(String::new())
    }
}

impl ToolCalls {
    /// Canonical stored representation.
    fn into_stored(self) -> String {
        match self {
            Self::Raw(s) => s,
            // Vec<Value> serialization cannot fail
            Self::Structured(calls) => {
                serde_json::to_string(&calls).unwrap_or_default()
            }
        }
    }
}

/// Factory input for [`MethodCard::build`]. All fields default to empty so
/// callers set only what they have.
#[derive(Debug, Clone, Default)]
pub struct CardDraft {
    pub task_intent: String,
    pub context: String,
    pub plan: String,
    pub tool_calls: ToolCalls,
    pub mistakes: String,
    pub fixes: String,
    pub outcome_score: f64,
    pub upvotes: i64,
    pub tags: Vec<String>,
}

impl MethodCard {
    /// Build a well-formed card from a draft: fresh UUID, current UTC
    /// timestamp, tool calls normalized to their stored string form.
    ///
    /// Pure construction — no I/O, no validation, always succeeds.
    pub fn build(draft: CardDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            task_intent: draft.task_intent,
            context: draft.context,
            plan: draft.plan,
            tool_calls: draft.tool_calls.into_stored(),
            mistakes: draft.mistakes,
            fixes: draft.fixes,
            outcome_score: draft.outcome_score,
            upvotes: draft.upvotes,
            tags: draft.tags,
        }
    }

    /// The lowercased text surface that keyword search matches against:
    /// `task_intent + plan + tags`.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.task_intent,
            self.plan,
            self.tags.join(",")
        )
        .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_assigns_id_and_timestamp() {
        let a = MethodCard::build(CardDraft {
            task_intent: "t".into(),
            ..Default::default()
        });
        let b = MethodCard::build(CardDraft {
            task_intent: "t".into(),
            ..Default::default()
        });
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        // RFC 3339 timestamps parse back
        chrono::DateTime::parse_from_rfc3339(&a.timestamp).unwrap();
    }

    #[test]
    fn structured_tool_calls_are_json_encoded() {
        let card = MethodCard::build(CardDraft {
            task_intent: "t".into(),
            tool_calls: ToolCalls::Structured(vec![
                serde_json::json!({"tool": "search", "args": "rust"}),
                serde_json::json!("fetch"),
            ]),
            ..Default::default()
        });
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&card.tool_calls).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], "fetch");
    }

    #[test]
    fn raw_tool_calls_stored_verbatim() {
        let card = MethodCard::build(CardDraft {
            task_intent: "t".into(),
            tool_calls: ToolCalls::Raw("grep, then edit".into()),
            ..Default::default()
        });
        assert_eq!(card.tool_calls, "grep, then edit");
    }

    #[test]
    fn search_text_is_lowercased_and_covers_tags() {
        let card = MethodCard::build(CardDraft {
            task_intent: "Explain Recursion".into(),
            plan: "Three sentences".into(),
            tags: vec!["Beginner".into(), "CS".into()],
            ..Default::default()
        });
        let text = card.search_text();
        assert!(text.contains("explain recursion"));
        assert!(text.contains("three sentences"));
        assert!(text.contains("beginner,cs"));
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        // An older store may lack upvotes entirely
        let card: MethodCard = serde_json::from_str(
            r#"{"id":"x","timestamp":"2024-01-01T00:00:00Z","task_intent":"t"}"#,
        )
        .unwrap();
        assert_eq!(card.upvotes, 0);
        assert!(card.tags.is_empty());
        assert_eq!(card.outcome_score, 0.0);
    }
}
