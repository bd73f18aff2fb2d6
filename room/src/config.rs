use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use holdem_shared::TableConfig;

/// Room configuration persisted as TOML, overlaid with the environment
/// variables the core runtime recognizes (`MIN_PLAYERS`, `START_SLEEP_TIME`,
/// `ROUND_OVER_DELAY_MS`, `LOG_LEVEL`) and finally with CLI flags, which the
/// binary merges in before an optional `--persist` save. Missing fields in
/// older config files fall back to the defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub table_id: String,
    /// Players required before the game may start.
    pub min_players: usize,
    /// Grace period between reaching `min_players` and the first deal,
    /// absorbing late joins.
    pub start_sleep_ms: u64,
    /// Pause between a finished round and the next deal.
    pub round_over_delay_ms: u64,
    pub log_level: String,
    pub starting_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Round cap; the game ends when it is reached.
    pub max_rounds: Option<u32>,
    pub max_seats: usize,
    /// Deck RNG seed; `None` means OS entropy.
    pub seed: Option<u64>,
    /// Port to bind; the server scans upward if it is taken.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            table_id: "table-1".to_string(),
            min_players: 2,
            start_sleep_ms: 3_000,
            round_over_delay_ms: 5_000,
            log_level: "info".to_string(),
            starting_chips: 1_000,
            small_blind: 10,
            big_blind: 20,
            max_rounds: None,
            max_seats: 6,
            seed: None,
            port: 3000,
        }
    }
}

impl Config {
    /// Load configuration from `path`. If the file does not exist, create it
    /// with defaults and return those.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)
                .with_context(|| format!("reading config file '{}'", path.display()))?;
            let cfg: Config = toml::from_str(&s)
                .with_context(|| format!("parsing TOML config '{}'", path.display()))?;
            Ok(cfg)
        } else {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("creating config directory '{}'", parent.display())
                    })?;
                }
            }
            let cfg = Config::default();
            let toml_text = toml::to_string_pretty(&cfg)
                .with_context(|| "serializing default config to TOML")?;
            fs::write(path, toml_text)
                .with_context(|| format!("writing default config to '{}'", path.display()))?;
            Ok(cfg)
        }
    }

    /// Save the current config back to `path` (overwrites).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating config directory '{}'", parent.display()))?;
            }
        }
        let toml_text =
            toml::to_string_pretty(self).with_context(|| "serializing config to TOML")?;
        fs::write(path, toml_text)
            .with_context(|| format!("writing config to '{}'", path.display()))?;
        Ok(())
    }

    /// Overlay the environment variables the core runtime recognizes.
    /// Unparseable values are ignored with a warning rather than fatal.
    pub fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("MIN_PLAYERS") {
            match v.parse() {
                Ok(n) => self.min_players = n,
                Err(_) => tracing::warn!(value = %v, "ignoring unparseable MIN_PLAYERS"),
            }
        }
        if let Ok(v) = std::env::var("START_SLEEP_TIME") {
            match v.parse() {
                Ok(ms) => self.start_sleep_ms = ms,
                Err(_) => tracing::warn!(value = %v, "ignoring unparseable START_SLEEP_TIME"),
            }
        }
        if let Ok(v) = std::env::var("ROUND_OVER_DELAY_MS") {
            match v.parse() {
                Ok(ms) => self.round_over_delay_ms = ms,
                Err(_) => tracing::warn!(value = %v, "ignoring unparseable ROUND_OVER_DELAY_MS"),
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            if !v.is_empty() {
                self.log_level = v;
            }
        }
    }

    /// The table-level slice of this config.
    pub fn table(&self) -> TableConfig {
        TableConfig {
            max_rounds: self.max_rounds,
            starting_chips: self.starting_chips,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            min_players: self.min_players,
            max_seats: self.max_seats,
        }
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_sleep_ms)
    }

    pub fn round_over_delay(&self) -> Duration {
        Duration::from_millis(self.round_over_delay_ms)
    }
}
