use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlaybookConfig {
    pub log_level: String,
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub moderation: ModerationLimits,
    pub retrieval: RetrievalConfig,
}

/// Durable backend connection settings. An empty `host` means "not
/// configured" and every operation uses the local file fallback.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    /// Hostname, optionally with scheme and/or `:port` suffix
    /// (e.g. `https://abc.clickhouse.cloud:8443`).
    pub host: String,
    /// Explicit port override; takes precedence over a port embedded in `host`.
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Per-request wall-clock limit in seconds. No store call blocks longer.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the fallback JSON file holding the full card array.
    pub cards_file: String,
    /// Maximum cards retained in the fallback file; oldest are dropped first.
    pub retention_cap: usize,
}

/// Size limits enforced by the moderation gate.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ModerationLimits {
    pub max_task_intent: usize,
    pub max_plan: usize,
    pub max_context: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    /// How many cards a query returns by default.
    pub default_top_n: usize,
    /// Superset fetched before keyword filtering.
    pub search_candidate_limit: usize,
}

impl Default for PlaybookConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            backend: BackendConfig::default(),
            storage: StorageConfig::default(),
            moderation: ModerationLimits::default(),
            retrieval: RetrievalConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            user: "default".into(),
            password: String::new(),
            database: "default".into(),
            timeout_secs: 10,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let cards_file = default_playbook_dir()
            .join("method_cards.json")
            .to_string_lossy()
            .into_owned();
        Self {
            cards_file,
            retention_cap: 100,
        }
    }
}

impl Default for ModerationLimits {
    fn default() -> Self {
        Self {
            max_task_intent: 2000,
            max_plan: 5000,
            max_context: 1000,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_n: 5,
            search_candidate_limit: 50,
        }
    }
}

/// Returns `~/.playbook/`
pub fn default_playbook_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".playbook")
}

/// Returns the default config file path: `~/.playbook/config.toml`
pub fn default_config_path() -> PathBuf {
    default_playbook_dir().join("config.toml")
}

impl PlaybookConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            PlaybookConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (CLICKHOUSE_HOST, CLICKHOUSE_PORT,
    /// CLICKHOUSE_USER, CLICKHOUSE_PASSWORD, PLAYBOOK_CARDS_FILE,
    /// PLAYBOOK_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CLICKHOUSE_HOST") {
            self.backend.host = val;
        }
        if let Ok(val) = std::env::var("CLICKHOUSE_PORT") {
            if let Ok(port) = val.parse() {
                self.backend.port = Some(port);
            }
        }
        if let Ok(val) = std::env::var("CLICKHOUSE_USER") {
            self.backend.user = val;
        }
        if let Ok(val) = std::env::var("CLICKHOUSE_PASSWORD") {
            self.backend.password = val;
        }
        if let Ok(val) = std::env::var("PLAYBOOK_CARDS_FILE") {
            self.storage.cards_file = val;
        }
        if let Ok(val) = std::env::var("PLAYBOOK_LOG_LEVEL") {
            self.log_level = val;
        }
    }

    /// Resolve the fallback file path, expanding `~` if needed.
    pub fn resolved_cards_file(&self) -> PathBuf {
        expand_tilde(&self.storage.cards_file)
    }
}

impl BackendConfig {
    /// Parse `host` into a connectable `(hostname, port)` pair, or `None` if
    /// the backend is unconfigured. Accepts bare hostnames, `http(s)://`
    /// prefixes, and embedded `:port` suffixes; cloud deployments expect a
    /// bare hostname plus port 8443.
    pub fn endpoint(&self) -> Option<(String, u16)> {
        let mut s = self.host.trim();
        for prefix in ["https://", "http://"] {
            if let Some(rest) = strip_prefix_ignore_case(s, prefix) {
                s = rest.trim();
                break;
            }
        }
        let (hostname, parsed_port) = match s.rsplit_once(':') {
            Some((host, port_str)) => match port_str.parse::<u16>() {
                Ok(port) => (host.trim(), Some(port)),
                Err(_) => (s, None),
            },
            None => (s, None),
        };
        if hostname.is_empty() {
            return None;
        }
        // Explicit config/env port wins over one embedded in the host string
        let port = self.port.or(parsed_port).unwrap_or(8443);
        Some((hostname.to_string(), port))
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
