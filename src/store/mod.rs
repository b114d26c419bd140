//! Dual-backend card persistence.
//!
//! [`CardStore`] is the sole writer of persisted state. Every call re-probes
//! configuration for the durable backend (connectivity can change between
//! calls, so the choice is never cached) and falls back to the local JSON
//! file when the durable path is unconfigured or errors. The public surface
//! never returns an error: failures become `false` or an empty result, so a
//! storage outage degrades the agent's behavior instead of crashing the run.

pub mod durable;
pub mod file;

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::card::MethodCard;
use crate::config::PlaybookConfig;
use durable::DurableBackend;
use file::FileStore;

pub struct CardStore {
    config: PlaybookConfig,
    fallback: FileStore,
}

/// Log-friendly id prefix (ids are untrusted, so stay on char boundaries).
pub(crate) fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

impl CardStore {
    pub fn new(config: &PlaybookConfig) -> Self {
        let fallback = FileStore::new(
            config.resolved_cards_file(),
            config.storage.retention_cap,
        );
        Self {
            config: config.clone(),
            fallback,
        }
    }

    /// Probe for the durable backend. Per-call on purpose: configuration or
    /// connectivity can change between calls.
    fn durable(&self) -> Option<DurableBackend> {
        let backend = DurableBackend::connect(&self.config.backend);
        if backend.is_none() {
            debug!("durable backend not configured, using local file store");
        }
        backend
    }

    /// Persist one card. Durable insert first; on any durable failure, append
    /// to the local file (which enforces the retention cap).
    pub fn save(&self, card: &MethodCard) -> bool {
        let short_id = short_id(&card.id);
        if let Some(backend) = self.durable() {
            match backend.insert(card) {
                Ok(()) => {
                    info!(id = %short_id, upvotes = card.upvotes, "saved card (durable)");
                    return true;
                }
                Err(e) => {
                    warn!(id = %short_id, error = %e, "durable insert failed, falling back to local file");
                }
            }
        }
        self.fallback.append(card)
    }

    /// Add one upvote to the card with this id. Not idempotent per call —
    /// every call adds one. Returns `false` for blank or unknown ids.
    pub fn increment_upvote(&self, id: &str) -> bool {
        if id.trim().is_empty() {
            warn!("increment_upvote: empty card id");
            return false;
        }
        let short_id = short_id(id);
        if let Some(backend) = self.durable() {
            match backend.upvote(id) {
                Ok(found) => {
                    if found {
                        info!(id = %short_id, "incremented upvotes (durable)");
                    } else {
                        warn!(id = %short_id, "upvote target not found (durable)");
                    }
                    return found;
                }
                Err(e) => {
                    warn!(id = %short_id, error = %e, "durable upvote failed, falling back to local file");
                }
            }
        }
        self.fallback.upvote(id)
    }

    /// Top `limit` cards by the composite ranking key
    /// (`upvotes DESC, outcome_score DESC, timestamp DESC`). On a durable
    /// table missing the `upvotes` column, the backend retries with the
    /// reduced ordering and defaults upvotes to 0; on any other durable
    /// failure the local file is read instead. Never errors — an unreachable
    /// backend and an empty file yield an empty result.
    pub fn query_ranked(&self, limit: usize) -> Vec<MethodCard> {
        let limit = limit.max(1);
        if let Some(backend) = self.durable() {
            match backend.select_ranked(limit) {
                Ok(cards) => {
                    debug!(count = cards.len(), "fetched ranked cards (durable)");
                    return cards;
                }
                Err(e) => {
                    warn!(error = %e, "durable query failed, reading local file");
                }
            }
        }
        self.fallback.ranked(limit)
    }

    /// The set of `task_intent` values present in either backend. Used by
    /// seeding to decide which baseline cards are missing.
    pub fn task_intents(&self) -> HashSet<String> {
        let mut intents = HashSet::new();
        if let Some(backend) = self.durable() {
            match backend.task_intents() {
                Ok(found) => {
                    intents.extend(
                        found
                            .into_iter()
                            .map(|t| t.trim().to_string())
                            .filter(|t| !t.is_empty()),
                    );
                }
                Err(e) => {
                    warn!(error = %e, "durable task_intent scan failed");
                }
            }
        }
        for card in self.fallback.load() {
            let intent = card.task_intent.trim();
            if !intent.is_empty() {
                intents.insert(intent.to_string());
            }
        }
        intents
    }
}
