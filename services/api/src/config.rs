//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub cors_origin: String,
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub generation_model: String,
    pub temperature: f32,
    pub youtube_api_key: String,
    pub youtube_api_base: String,
    /// Sessions untouched for this many seconds are dropped.
    pub session_idle_secs: i64,
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
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var_or =
            |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingVar(name.to_string()))
        };

        // --- Server Settings ---
        let bind_address_str = var_or("BIND_ADDRESS", "0.0.0.0:3000");
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin = var_or("CORS_ORIGIN", "http://localhost:3000");

        // --- API Keys (both required) ---
        let gemini_api_key = required("GEMINI_API_KEY")?;
        let youtube_api_key = required("YOUTUBE_API_KEY")?;

        // --- Adapter-specific Settings ---
        let gemini_api_base = var_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE);
        let generation_model = var_or("GENERATION_MODEL", "gemini-1.5-flash");
        let youtube_api_base = var_or("YOUTUBE_API_BASE", DEFAULT_YOUTUBE_API_BASE);

        let temperature_str = var_or("GENERATION_TEMPERATURE", "0.7");
        let temperature = temperature_str
            .parse::<f32>()
            .ok()
            .filter(|t| (0.0..=2.0).contains(t))
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "GENERATION_TEMPERATURE".to_string(),
                    format!("'{}' is not a number between 0 and 2", temperature_str),
                )
            })?;

        // --- Session Housekeeping ---
        let idle_str = var_or("SESSION_IDLE_SECS", "3600");
        let session_idle_secs = idle_str
            .parse::<i64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SESSION_IDLE_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", idle_str),
                )
            })?;

        Ok(Self {
            bind_address,
            log_level,
            cors_origin,
            gemini_api_key,
            gemini_api_base,
            generation_model,
            temperature,
            youtube_api_key,
            youtube_api_base,
            session_idle_secs,
        })
    }
}
