//! Local JSON file fallback backend.
//!
//! Holds the full card collection as a single JSON array, rewritten on every
//! save. This is the degraded/offline path: a malformed or missing file reads
//! as an empty store, the collection is capped at a fixed retention limit
//! (most recent kept), and the read-modify-write cycle is only safe for a
//! single writer at a time.

use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::card::MethodCard;
use crate::ranking::composite_order;

pub struct FileStore {
    path: PathBuf,
    retention_cap: usize,
}

impl FileStore {
    pub fn new(path: PathBuf, retention_cap: usize) -> Self {
        Self {
            path,
            retention_cap,
        }
    }

    /// Load all cards. Missing or malformed files read as an empty store.
    pub fn load(&self) -> Vec<MethodCard> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "cards file missing, returning empty");
            return Vec::new();
        }
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read cards file");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<MethodCard>>(&contents) {
            Ok(cards) => {
                debug!(count = cards.len(), "loaded cards from file");
                cards
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed cards file, treating as empty");
                Vec::new()
            }
        }
    }

    /// Rewrite the whole array. Writes to a temp file then renames so a crash
    /// mid-write never leaves a truncated store behind.
    fn write_all(&self, cards: &[MethodCard]) -> bool {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                error!(dir = %parent.display(), error = %e, "failed to create cards directory");
                return false;
            }
        }
        let json = match serde_json::to_string_pretty(cards) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize cards");
                return false;
            }
        };
        let tmp_path = self.path.with_extension("tmp");
        if let Err(e) = std::fs::write(&tmp_path, json) {
            error!(path = %tmp_path.display(), error = %e, "failed to write cards file");
            return false;
        }
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            error!(path = %self.path.display(), error = %e, "failed to replace cards file");
            return false;
        }
        info!(count = cards.len(), path = %self.path.display(), "saved cards file");
        true
    }

    /// Append one card, dropping the oldest (by timestamp) beyond the
    /// retention cap.
    pub fn append(&self, card: &MethodCard) -> bool {
        let mut cards = self.load();
        cards.push(card.clone());
        if cards.len() > self.retention_cap {
            cards.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            cards.truncate(self.retention_cap);
        }
        self.write_all(&cards)
    }

    /// Increment the upvote count of the first card matching `id`.
    /// Returns `false` if no card matches or the rewrite fails.
    pub fn upvote(&self, id: &str) -> bool {
        let mut cards = self.load();
        match cards.iter_mut().find(|c| c.id == id) {
            Some(card) => {
                card.upvotes += 1;
                if self.write_all(&cards) {
                    info!(id = %crate::store::short_id(id), "incremented upvotes (file)");
                    true
                } else {
                    false
                }
            }
            None => {
                warn!(id = %crate::store::short_id(id), "upvote target not found (file)");
                false
            }
        }
    }

    /// Top `limit` cards by the composite ranking key. Upvotes are always
    /// present in the file format, so the full ordering applies.
    pub fn ranked(&self, limit: usize) -> Vec<MethodCard> {
        let mut cards = self.load();
        cards.sort_by(composite_order);
        cards.truncate(limit);
        cards
    }
}
