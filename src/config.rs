//! Source-selection and credential configuration.
//!
//! The config file is optional - a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde. The Ghost API key may come
//! from the `GHOST_CONTENT_API_KEY` environment variable, which takes
//! precedence over the config file.
//!
//! `use_live_sources` replaces the original compile-time source toggle with
//! an explicit value resolved at assembly time: development builds default
//! to the static sample source, release builds to the live fallback-composed
//! pipeline.

use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable carrying the Ghost Content API key.
pub const GHOST_API_KEY_ENV: &str = "GHOST_CONTENT_API_KEY";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to `Default::default()`.
///
/// Custom Debug impl masks `ghost.api_key` to prevent secret leakage in
/// logs, error messages, and debug output.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Select the live fallback-composed pipeline instead of static
    /// samples. Defaults by build profile: off under debug, on in release.
    pub use_live_sources: bool,

    /// Ghost Content API settings.
    pub ghost: GhostConfig,

    /// URL of the RSS fallback feed.
    pub rss_feed_url: String,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    /// Base URL of the Ghost instance.
    pub base_url: String,

    /// Content API key (alternative to the `GHOST_CONTENT_API_KEY` env
    /// var). Env var takes precedence over config file.
    pub api_key: Option<String>,

    /// Result-size limit requested from the posts endpoint.
    pub limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_live_sources: !cfg!(debug_assertions),
            ghost: GhostConfig::default(),
            rss_feed_url: "https://etherworld.co/rss/".to_string(),
        }
    }
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            base_url: "https://etherworld.co".to_string(),
            api_key: None,
            limit: 20,
        }
    }
}

/// Mask the API key in Debug output to prevent secret leakage.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("use_live_sources", &self.use_live_sources)
            .field("ghost.base_url", &self.ghost.base_url)
            .field(
                "ghost.api_key",
                &self.ghost.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("ghost.limit", &self.ghost.limit)
            .field("rss_feed_url", &self.rss_feed_url)
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the Ghost API key: environment first, then config file.
    /// Returns `None` when neither is set; the Ghost source turns that into
    /// a configuration error at fetch time.
    pub fn ghost_api_key(&self) -> Option<SecretString> {
        std::env::var(GHOST_API_KEY_ENV)
            .ok()
            .or_else(|| self.ghost.api_key.clone())
            .map(SecretString::from)
    }
}
