//! Ingestor configuration: TOML file, environment overrides, normalization.
//!
//! Everything operational lives in a small TOML file (symbols, store path,
//! cadence, lookback, feed). `SYMBOLS` and `DB_PATH` environment variables
//! override the file so a deployment can retarget without editing it.
//! Vendor credentials are read from the environment by the source layer and
//! never appear here.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use market_feed::models::request::Feed;

fn default_db_path() -> String {
    "store/market.sqlite".to_string()
}

fn default_lookback_minutes() -> u32 {
    15
}

fn default_cadence_secs() -> u64 {
    60
}

/// Ingestor settings, as parsed from TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tickers to track (normalized to unique uppercase, order preserved).
    pub symbols: Vec<String>,

    /// Path of the SQLite store file.
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Minutes of live tail to request each cycle while inside RTH.
    #[serde(default = "default_lookback_minutes")]
    pub lookback_minutes: u32,

    /// Seconds between ingestion cycles.
    #[serde(default = "default_cadence_secs")]
    pub cadence_secs: u64,

    /// Vendor feed to read from.
    #[serde(default)]
    pub feed: Feed,
}

impl Config {
    /// Parse and normalize a config from a TOML string. Environment
    /// overrides are not applied here; see [`Config::load`].
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let mut cfg: Config = toml::from_str(s).context("failed to parse config TOML")?;
        cfg.normalize()?;
        Ok(cfg)
    }

    /// Read a config file, apply `SYMBOLS`/`DB_PATH` environment overrides,
    /// and normalize.
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config file {}", path.as_ref().display()))?;
        let mut cfg: Config = toml::from_str(&text).context("failed to parse config TOML")?;
        cfg.apply_env_overrides();
        cfg.normalize()?;
        Ok(cfg)
    }

    /// Build a config purely from the environment (no file present):
    /// `SYMBOLS` (comma-separated, required) and `DB_PATH` (optional).
    pub fn from_env() -> anyhow::Result<Self> {
        let symbols = shared_utils::env::get_env_var("SYMBOLS")
            .context("no config file and SYMBOLS not set")?;
        let mut cfg = Config {
            symbols: split_symbols(&symbols),
            db_path: shared_utils::env::env_or("DB_PATH", &default_db_path()),
            lookback_minutes: default_lookback_minutes(),
            cadence_secs: default_cadence_secs(),
            feed: Feed::default(),
        };
        cfg.normalize()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(s) = shared_utils::env::get_env_var("SYMBOLS") {
            self.symbols = split_symbols(&s);
        }
        if let Ok(p) = shared_utils::env::get_env_var("DB_PATH") {
            self.db_path = p;
        }
    }

    /// Trim, uppercase, and de-duplicate symbols preserving order; reject an
    /// empty result and out-of-range numeric settings.
    pub fn normalize(&mut self) -> anyhow::Result<()> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::with_capacity(self.symbols.len());
        for raw in std::mem::take(&mut self.symbols) {
            let sym = raw.trim().to_uppercase();
            if sym.is_empty() {
                continue;
            }
            if seen.insert(sym.clone()) {
                out.push(sym);
            }
        }
        if out.is_empty() {
            bail!("symbol list is empty after normalization");
        }
        self.symbols = out;

        if self.lookback_minutes == 0 {
            bail!("lookback_minutes must be at least 1");
        }
        if self.cadence_secs == 0 {
            bail!("cadence_secs must be at least 1");
        }
        if self.db_path.trim().is_empty() {
            bail!("db_path cannot be empty");
        }
        Ok(())
    }
}

fn split_symbols(s: &str) -> Vec<String> {
    s.split(',').map(|p| p.trim().to_string()).collect()
}
