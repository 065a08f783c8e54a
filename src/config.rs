//! Environment-driven configuration

use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CONCLUSION_DELAY_MS: u64 = 500;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Configuration for the completion endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer credential; absent means every completion fails with an auth error
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub llm: LlmConfig,
    /// Pause between a conclusion marker and the verdict turn
    pub conclusion_delay: Duration,
    /// Abandoned conversations are torn down after this long
    pub idle_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let number = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(name) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { name, value }),
            }
        };

        let port = number("SALES_TRAINER_PORT", u64::from(DEFAULT_PORT))?;
        let port = u16::try_from(port).map_err(|_| ConfigError::InvalidNumber {
            name: "SALES_TRAINER_PORT",
            value: port.to_string(),
        })?;

        Ok(Self {
            port,
            llm: LlmConfig {
                api_key: lookup("LLM_API_KEY").filter(|k| !k.trim().is_empty()),
                base_url: lookup("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout: Duration::from_secs(number("LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
            },
            conclusion_delay: Duration::from_millis(number(
                "CONCLUSION_DELAY_MS",
                DEFAULT_CONCLUSION_DELAY_MS,
            )?),
            idle_timeout: Duration::from_secs(number(
                "CONVERSATION_IDLE_SECS",
                DEFAULT_IDLE_TIMEOUT_SECS,
            )?),
        })
    }
}
