//! Marketplace configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `CRAFTIFY_DATA_DIR` - Directory holding the file-backed store (default: `.craftify`)
//! - `CRAFTIFY_UPI_COUNTDOWN_SECS` - UPI confirmation countdown length (default: 10)
//! - `CRAFTIFY_SLIDESHOW_SECS` - Home slideshow rotation period (default: 3)
//! - `CRAFTIFY_TOAST_MS` - Toast auto-dismiss delay (default: 1800)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default directory of the file-backed store.
pub const DEFAULT_DATA_DIR: &str = ".craftify";

/// Default UPI countdown length in seconds.
pub const DEFAULT_UPI_COUNTDOWN_SECS: u32 = 10;

/// Default slideshow period in seconds.
pub const DEFAULT_SLIDESHOW_SECS: u64 = 3;

/// Default toast lifetime in milliseconds.
pub const DEFAULT_TOAST_MS: u64 = 1800;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Marketplace configuration.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,
    /// Number of one-second ticks before a UPI order is placed
    pub upi_countdown_secs: u32,
    /// Home slideshow rotation period
    pub slideshow_period: Duration,
    /// How long a toast stays visible
    pub toast_ttl: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            upi_countdown_secs: DEFAULT_UPI_COUNTDOWN_SECS,
            slideshow_period: Duration::from_secs(DEFAULT_SLIDESHOW_SECS),
            toast_ttl: Duration::from_millis(DEFAULT_TOAST_MS),
        }
    }
}

impl MarketConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("CRAFTIFY_DATA_DIR", DEFAULT_DATA_DIR));
        let upi_countdown_secs = parse_env(
            "CRAFTIFY_UPI_COUNTDOWN_SECS",
            DEFAULT_UPI_COUNTDOWN_SECS,
        )?;
        let slideshow_secs = parse_env("CRAFTIFY_SLIDESHOW_SECS", DEFAULT_SLIDESHOW_SECS)?;
        if slideshow_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CRAFTIFY_SLIDESHOW_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let toast_ms = parse_env("CRAFTIFY_TOAST_MS", DEFAULT_TOAST_MS)?;

        Ok(Self {
            data_dir,
            upi_countdown_secs,
            slideshow_period: Duration::from_secs(slideshow_secs),
            toast_ttl: Duration::from_millis(toast_ms),
        })
    }

    /// Override the data directory (used by the CLI `--data-dir` flag).
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional numeric environment variable.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MarketConfig::default();
        assert_eq!(config.data_dir, PathBuf::from(".craftify"));
        assert_eq!(config.upi_countdown_secs, 10);
        assert_eq!(config.slideshow_period, Duration::from_secs(3));
        assert_eq!(config.toast_ttl, Duration::from_millis(1800));
    }

    #[test]
    fn test_parse_env_missing_uses_default() {
        let value: u32 = parse_env("CRAFTIFY_TEST_SURELY_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_with_data_dir() {
        let config = MarketConfig::default().with_data_dir("/tmp/craftify-test");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/craftify-test"));
    }
}
