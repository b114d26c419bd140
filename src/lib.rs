//! Method Card store and ranking engine for self-improving AI agents.
//!
//! A Method Card is a structured playbook describing how a past task was
//! approached, what went wrong, and how well the outcome scored. Agents
//! retrieve the best-rated cards for a new task, and write a new card (plus
//! an upvote on the cards they reused) after the run is judged.
//!
//! # Architecture
//!
//! - **Storage**: dual backend — a ClickHouse-compatible columnar store over
//!   its HTTP interface when configured, with a transparent fallback to a
//!   local JSON file (capped at 100 cards). The backend is re-probed on every
//!   call; callers never see a backend-selection error.
//! - **Ranking**: composite key `upvotes DESC, outcome_score DESC,
//!   timestamp DESC` — community-endorsed methods outrank merely high-scoring
//!   ones, which outrank merely recent ones. Search is case-insensitive
//!   substring matching over `task_intent + plan + tags` (no embeddings).
//! - **Failure model**: the store and engine never raise across their public
//!   boundary. Backend failures degrade to the fallback file or an empty
//!   result, so a retrieval failure costs the agent playbooks, not the run.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`card`] — The Method Card record and its factory
//! - [`moderation`] — Pre-write validation gate (size limits, spam heuristic)
//! - [`store`] — Dual-backend persistence: durable HTTP backend + JSON file fallback
//! - [`ranking`] — Keyword search and top-N retrieval over the store
//! - [`seed`] — Baseline card seeding so a cold store is never empty

pub mod card;
pub mod config;
pub mod moderation;
pub mod ranking;
pub mod seed;
pub mod store;
