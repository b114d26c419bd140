//! Durable columnar backend over the ClickHouse HTTP interface.
//!
//! SQL statements are POSTed to the server; row data travels as
//! `FORMAT JSONEachRow` (one JSON object per line) in both directions, which
//! keeps card content out of SQL string interpolation entirely. The only
//! interpolated value is the card id in the upvote mutation, which is escaped
//! first — it is untrusted input.
//!
//! Schema drift is handled as an explicit two-step protocol: attempt the full
//! projection including `upvotes`, and if the server reports that specific
//! unknown-column failure, retry once with the reduced projection and default
//! `upvotes` to 0 (older tables stay usable in degraded form).

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::card::MethodCard;
use crate::config::BackendConfig;

const TABLE: &str = "method_cards";

/// DDL for the card table. Timestamp stored as String for simple ISO-8601
/// ordering; tags flattened to a comma-joined string for compatibility with
/// pre-existing tables.
const CREATE_TABLE_SQL: &str = "\
CREATE TABLE IF NOT EXISTS method_cards (
    id String,
    timestamp String,
    task_intent String,
    context String,
    plan String,
    tool_calls String,
    mistakes String,
    fixes String,
    outcome_score Float64,
    upvotes Int64 DEFAULT 0,
    tags String
) ENGINE = MergeTree()
ORDER BY (timestamp, id)";

const ADD_UPVOTES_SQL: &str =
    "ALTER TABLE method_cards ADD COLUMN IF NOT EXISTS upvotes Int64 DEFAULT 0";

const COLUMNS_FULL: &str =
    "id, timestamp, task_intent, context, plan, tool_calls, mistakes, fixes, outcome_score, upvotes, tags";
const COLUMNS_REDUCED: &str =
    "id, timestamp, task_intent, context, plan, tool_calls, mistakes, fixes, outcome_score, tags";
const ORDER_FULL: &str = "upvotes DESC, outcome_score DESC, timestamp DESC";
const ORDER_REDUCED: &str = "outcome_score DESC, timestamp DESC";

/// Failure classes of the durable backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("malformed response row: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    /// True for the unknown-column failure class (ClickHouse reports missing
    /// columns as `UNKNOWN_IDENTIFIER`, error code 47). Only this class
    /// triggers the reduced-projection retry.
    pub fn is_missing_column(&self) -> bool {
        match self {
            Self::Server { body, .. } => {
                body.contains("UNKNOWN_IDENTIFIER")
                    || body.contains("Code: 47")
                    || body.contains("upvotes")
            }
            _ => false,
        }
    }
}

/// Wire representation of one table row, flattened per the table schema.
#[derive(Debug, Serialize, Deserialize)]
struct CardRow {
    id: String,
    timestamp: String,
    task_intent: String,
    #[serde(default)]
    context: String,
    #[serde(default)]
    plan: String,
    #[serde(default)]
    tool_calls: String,
    #[serde(default)]
    mistakes: String,
    #[serde(default)]
    fixes: String,
    #[serde(default)]
    outcome_score: f64,
    #[serde(default)]
    upvotes: i64,
    #[serde(default)]
    tags: String,
}

impl From<&MethodCard> for CardRow {
    fn from(card: &MethodCard) -> Self {
        Self {
            id: card.id.clone(),
            timestamp: card.timestamp.clone(),
            task_intent: card.task_intent.clone(),
            context: card.context.clone(),
            plan: card.plan.clone(),
            tool_calls: card.tool_calls.clone(),
            mistakes: card.mistakes.clone(),
            fixes: card.fixes.clone(),
            outcome_score: card.outcome_score,
            upvotes: card.upvotes,
            tags: card.tags.join(","),
        }
    }
}

impl CardRow {
    fn into_card(self) -> MethodCard {
        MethodCard {
            id: self.id,
            timestamp: self.timestamp,
            task_intent: self.task_intent,
            context: self.context,
            plan: self.plan,
            tool_calls: self.tool_calls,
            mistakes: self.mistakes,
            fixes: self.fixes,
            outcome_score: self.outcome_score,
            upvotes: self.upvotes,
            tags: self
                .tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// A connection to the durable backend, built fresh per store call (no pooled
/// client survives a network interruption).
pub struct DurableBackend {
    url: String,
    user: String,
    password: String,
    database: String,
    client: reqwest::blocking::Client,
}

impl DurableBackend {
    /// Probe configuration and construct a client, or `None` when the backend
    /// is unconfigured or the client cannot be built. Never an error —
    /// absence of the durable backend just means the fallback path runs.
    pub fn connect(config: &BackendConfig) -> Option<Self> {
        let (host, port) = config.endpoint()?;
        // Cloud deployments terminate TLS on 8443
        let scheme = if port == 8443 { "https" } else { "http" };
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build();
        let client = match client {
            Ok(client) => client,
            Err(e) => {
                debug!(error = %e, "failed to build durable backend client");
                return None;
            }
        };
        Some(Self {
            url: format!("{scheme}://{host}:{port}/"),
            user: config.user.clone(),
            password: config.password.clone(),
            database: config.database.clone(),
            client,
        })
    }

    /// POST one SQL statement (with optional trailing row data) and return
    /// the response body.
    fn execute(&self, sql: String) -> Result<String, BackendError> {
        let response = self
            .client
            .post(&self.url)
            .header("X-ClickHouse-User", &self.user)
            .header("X-ClickHouse-Key", &self.password)
            .query(&[("database", self.database.as_str())])
            .body(sql)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(BackendError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// Idempotent schema creation, plus a best-effort `upvotes` column add
    /// for tables created by an older schema. The column add is allowed to
    /// fail — older tables remain usable via the reduced-projection retry.
    pub fn ensure_table(&self) -> Result<(), BackendError> {
        self.execute(CREATE_TABLE_SQL.to_string())?;
        if let Err(e) = self.execute(ADD_UPVOTES_SQL.to_string()) {
            debug!(error = %e, "could not add upvotes column (older table stays degraded)");
        }
        Ok(())
    }

    /// Insert one card as a JSONEachRow payload.
    pub fn insert(&self, card: &MethodCard) -> Result<(), BackendError> {
        self.ensure_table()?;
        let row = serde_json::to_string(&CardRow::from(card))?;
        self.execute(format!("INSERT INTO {TABLE} FORMAT JSONEachRow\n{row}"))?;
        Ok(())
    }

    /// In-place upvote increment. Returns `Ok(false)` when no row matches the
    /// id; the existence probe runs first because the mutation itself reports
    /// nothing about matched rows.
    pub fn upvote(&self, id: &str) -> Result<bool, BackendError> {
        self.ensure_table()?;
        let safe_id = escape_sql_string(id);
        let count = self.execute(format!(
            "SELECT count() FROM {TABLE} WHERE id = '{safe_id}'"
        ))?;
        if count.trim().parse::<u64>().unwrap_or(0) == 0 {
            return Ok(false);
        }
        self.execute(format!(
            "ALTER TABLE {TABLE} UPDATE upvotes = upvotes + 1 WHERE id = '{safe_id}'"
        ))?;
        Ok(true)
    }

    /// Top `limit` cards by the composite ranking key, with the
    /// missing-column retry: if the table predates the `upvotes` column, run
    /// the reduced query and default upvotes to 0 on every row.
    pub fn select_ranked(&self, limit: usize) -> Result<Vec<MethodCard>, BackendError> {
        match self.select(COLUMNS_FULL, ORDER_FULL, limit) {
            Ok(cards) => Ok(cards),
            Err(e) if e.is_missing_column() => {
                info!("durable table lacks upvotes column, retrying reduced query");
                self.select(COLUMNS_REDUCED, ORDER_REDUCED, limit)
            }
            Err(e) => Err(e),
        }
    }

    fn select(
        &self,
        columns: &str,
        order: &str,
        limit: usize,
    ) -> Result<Vec<MethodCard>, BackendError> {
        let body = self.execute(format!(
            "SELECT {columns} FROM {TABLE} ORDER BY {order} LIMIT {limit} FORMAT JSONEachRow"
        ))?;
        let mut cards = Vec::new();
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let row: CardRow = serde_json::from_str(line)?;
            cards.push(row.into_card());
        }
        Ok(cards)
    }

    /// Total row count, for diagnostics.
    pub fn count(&self) -> Result<u64, BackendError> {
        self.ensure_table()?;
        let body = self.execute(format!("SELECT count() FROM {TABLE}"))?;
        Ok(body.trim().parse().unwrap_or(0))
    }

    /// Every distinct `task_intent` currently in the table.
    pub fn task_intents(&self) -> Result<Vec<String>, BackendError> {
        #[derive(Deserialize)]
        struct IntentRow {
            task_intent: String,
        }
        let body =
            self.execute(format!("SELECT task_intent FROM {TABLE} FORMAT JSONEachRow"))?;
        let mut intents = Vec::new();
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let row: IntentRow = serde_json::from_str(line)?;
            intents.push(row.task_intent);
        }
        Ok(intents)
    }
}

/// Escape a string value for interpolation into a single-quoted SQL literal.
fn escape_sql_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "''")
}
