use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default upstream model for the identity prompt.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default OpenAI-compatible API root.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for the outbound completion call.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct InstagramConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    /// Display-only environment name reported by `GET /`.
    pub environment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// Missing keys are tolerated at startup; requests then fail with a 500.
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl InstagramConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(InstagramConfig {
            common: common_config,
            openai: OpenAiConfig {
                api_key: optional_env("OPENAI_API_KEY").map(Secret::new),
                base_url: get_env("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                model: get_env("OPENAI_MODEL", DEFAULT_MODEL),
                timeout_secs: parse_env("OPENAI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
            environment: get_env("ENVIRONMENT", "development"),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => raw.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e))
        }),
        None => Ok(default),
    }
}
