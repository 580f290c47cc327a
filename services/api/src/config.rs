//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Catalogue JSON file. The embedded catalogue is used when unset.
    pub catalogue_path: Option<PathBuf>,
    /// `None` runs the server with the AI features answering "not configured".
    pub ai_api_key: Option<String>,
    pub ai_base_url: String,
    pub advice_model: String,
    pub vision_model: String,
    pub ai_timeout: Duration,
    pub max_image_bytes: usize,
    pub allowed_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let catalogue_path = non_empty(lookup("CATALOGUE_PATH")).map(PathBuf::from);

        let allowed_origin =
            lookup("ALLOWED_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        // --- AI Gateway (key is optional) ---
        let ai_api_key = non_empty(lookup("GEMINI_API_KEY")).or_else(|| non_empty(lookup("API_KEY")));
        let ai_base_url = lookup("AI_BASE_URL").unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string());
        let advice_model = lookup("ADVICE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let vision_model = lookup("VISION_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let ai_timeout_secs = positive_number(&lookup, "AI_TIMEOUT_SECS", 30)?;
        let max_image_bytes = positive_number(&lookup, "MAX_IMAGE_BYTES", 10 * 1024 * 1024)?;

        Ok(Self {
            bind_address,
            log_level,
            catalogue_path,
            ai_api_key,
            ai_base_url,
            advice_model,
            vision_model,
            ai_timeout: Duration::from_secs(ai_timeout_secs as u64),
            max_image_bytes,
            allowed_origin,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn positive_number<F>(lookup: &F, key: &str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("'{}' is not a positive integer", raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.catalogue_path.is_none());
        assert!(config.ai_api_key.is_none());
        assert_eq!(config.ai_base_url, DEFAULT_AI_BASE_URL);
        assert_eq!(config.ai_timeout, Duration::from_secs(30));
        assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn gemini_key_wins_over_the_generic_key() {
        let config = config_from(&[("API_KEY", "generic"), ("GEMINI_API_KEY", "gemini")]).unwrap();
        assert_eq!(config.ai_api_key.as_deref(), Some("gemini"));

        let config = config_from(&[("API_KEY", "generic"), ("GEMINI_API_KEY", " ")]).unwrap();
        assert_eq!(config.ai_api_key.as_deref(), Some("generic"));
    }

    #[test]
    fn invalid_values_are_reported_by_name() {
        let cases = [
            ("BIND_ADDRESS", "nowhere"),
            ("RUST_LOG", "loud"),
            ("AI_TIMEOUT_SECS", "0"),
            ("MAX_IMAGE_BYTES", "-5"),
        ];
        for (key, value) in cases {
            match config_from(&[(key, value)]) {
                Err(ConfigError::InvalidValue(name, _)) => assert_eq!(name, key),
                other => panic!("expected InvalidValue for {}, got {:?}", key, other),
            }
        }
    }
}
