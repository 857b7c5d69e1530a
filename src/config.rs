use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{MeepleError, Result};

/// Engine configuration, passed explicitly to the engine and providers.
///
/// Defaults match the public BoardGameGeek XML API and a local SQLite cache.
/// [`EngineConfig::from_env`] overlays environment variables on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the catalog XML API (trailing slash expected)
    pub catalog_base_url: String,

    /// HTTP timeout for catalog requests
    pub request_timeout_secs: u64,

    /// SQLite database path for the search cache
    pub db_path: String,

    /// Disable to skip the SQLite cache entirely
    pub cache_enabled: bool,

    /// Upper bound on returned search hits
    pub max_results: usize,

    /// Positive votes must exceed this multiple of negative votes
    pub good_player_count_factor: u32,

    /// HTTP server port
    pub port: u16,

    /// Domain used for calendar entry uids and links
    pub site_domain: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: "https://boardgamegeek.com/xmlapi2/".to_string(),
            request_timeout_secs: 10,
            db_path: "meeple.db".to_string(),
            cache_enabled: true,
            max_results: 10,
            good_player_count_factor: 3,
            port: 8090,
            site_domain: "meeple-cgn.web.app".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized: `CATALOG_BASE_URL`, `CATALOG_TIMEOUT_SECS`, `DB_PATH`,
    /// `CACHE_ENABLED`, `MAX_RESULTS`, `PORT`, `SITE_DOMAIN`.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CATALOG_BASE_URL") {
            config.catalog_base_url = if url.ends_with('/') { url } else { format!("{}/", url) };
        }
        if let Some(v) = lookup("CATALOG_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_var("CATALOG_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("DB_PATH") {
            config.db_path = v;
        }
        if let Some(v) = lookup("CACHE_ENABLED") {
            config.cache_enabled = parse_var("CACHE_ENABLED", &v)?;
        }
        if let Some(v) = lookup("MAX_RESULTS") {
            config.max_results = parse_var("MAX_RESULTS", &v)?;
        }
        if let Some(v) = lookup("PORT") {
            config.port = parse_var("PORT", &v)?;
        }
        if let Some(v) = lookup("SITE_DOMAIN") {
            config.site_domain = v;
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| MeepleError::Config(format!("{} has invalid value '{}'", key, value)))
}
