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

const GEMINI_OPENAI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const OPENAI_BASE: &str = "https://api.openai.com/v1";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Connection settings for the OpenAI-compatible summary endpoint.
#[derive(Clone, Debug)]
pub struct SummaryProviderConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub lectures_path: PathBuf,
    pub log_level: Level,
    pub cors_origin: Option<String>,
    /// `None` when no API key is set; summaries then always fail.
    pub summary_provider: Option<SummaryProviderConfig>,
    /// `None` disables the timeout around the provider call.
    pub summary_timeout: Option<Duration>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server and Storage Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:4000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let lectures_path = var("LECTURES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/lectures.json"));

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin = var("CORS_ORIGIN").filter(|s| !s.trim().is_empty());

        // --- Summary Provider Settings ---
        // Gemini (through its OpenAI compatibility layer) wins when both keys are present.
        let provider = match (var("GEMINI_API_KEY"), var("OPENAI_API_KEY")) {
            (Some(key), _) if !key.is_empty() => Some((key, GEMINI_OPENAI_BASE, "gemini-2.0-flash")),
            (_, Some(key)) if !key.is_empty() => Some((key, OPENAI_BASE, "gpt-4o-mini")),
            _ => None,
        };
        let summary_provider = provider.map(|(api_key, default_base, default_model)| {
            SummaryProviderConfig {
                api_key,
                api_base: var("SUMMARY_API_BASE").unwrap_or_else(|| default_base.to_string()),
                model: var("SUMMARY_MODEL").unwrap_or_else(|| default_model.to_string()),
            }
        });

        let timeout_str = var("SUMMARY_TIMEOUT_SECS").unwrap_or_else(|| "60".to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "SUMMARY_TIMEOUT_SECS".to_string(),
                format!("'{}' is not a whole number of seconds", timeout_str),
            )
        })?;
        let summary_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            bind_address,
            lectures_path,
            log_level,
            cors_origin,
            summary_provider,
            summary_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address.port(), 4000);
        assert_eq!(config.lectures_path, PathBuf::from("./data/lectures.json"));
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.cors_origin.is_none());
        assert!(config.summary_provider.is_none());
        assert_eq!(config.summary_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn gemini_key_selects_gemini_endpoint() {
        let config = load(&[("GEMINI_API_KEY", "g-key"), ("OPENAI_API_KEY", "o-key")]).unwrap();
        let provider = config.summary_provider.unwrap();
        assert_eq!(provider.api_key, "g-key");
        assert_eq!(provider.api_base, GEMINI_OPENAI_BASE);
        assert_eq!(provider.model, "gemini-2.0-flash");
    }

    #[test]
    fn openai_key_with_overrides() {
        let config = load(&[
            ("OPENAI_API_KEY", "o-key"),
            ("SUMMARY_MODEL", "gpt-4o"),
            ("SUMMARY_API_BASE", "http://localhost:8080/v1"),
            ("SUMMARY_TIMEOUT_SECS", "0"),
        ])
        .unwrap();
        let provider = config.summary_provider.unwrap();
        assert_eq!(provider.api_base, "http://localhost:8080/v1");
        assert_eq!(provider.model, "gpt-4o");
        assert!(config.summary_timeout.is_none());
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            load(&[("BIND_ADDRESS", "nowhere")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "BIND_ADDRESS"
        ));
        assert!(matches!(
            load(&[("RUST_LOG", "chatty")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "RUST_LOG"
        ));
        assert!(matches!(
            load(&[("SUMMARY_TIMEOUT_SECS", "-3")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "SUMMARY_TIMEOUT_SECS"
        ));
    }
}
