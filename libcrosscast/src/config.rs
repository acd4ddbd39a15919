//! Configuration management for crosscast
//!
//! All configuration comes from environment variables, read once at startup
//! into an explicit [`Config`] that is passed to the clients needing it.
//! Missing credentials are collected and reported together so an operator
//! can fix them in one pass instead of replaying the failure per variable.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const DEFAULT_FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev";
pub const DEFAULT_TYPEFULLY_API_URL: &str = "https://api.typefully.com";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub firecrawl: FirecrawlConfig,
    pub typefully: TypefullyConfig,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirecrawlConfig {
    pub api_key: String,
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypefullyConfig {
    pub api_key: String,
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Required variables (`FIRECRAWL_API_KEY`, `TYPEFULLY_API_KEY`,
    /// `OPENAI_API_KEY`) are checked together; if any are absent the
    /// returned error lists every missing name, not just the first.
    /// Base URLs and the generation model have defaults and can be
    /// overridden through `FIRECRAWL_API_URL`, `TYPEFULLY_API_URL`,
    /// `OPENAI_API_URL`, and `OPENAI_MODEL`.
    pub fn from_env() -> Result<Self> {
        let mut missing = Vec::new();

        let firecrawl_key = required_var("FIRECRAWL_API_KEY", &mut missing);
        let typefully_key = required_var("TYPEFULLY_API_KEY", &mut missing);
        let openai_key = required_var("OPENAI_API_KEY", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing).into());
        }

        Ok(Self {
            firecrawl: FirecrawlConfig {
                api_key: firecrawl_key,
                api_url: optional_var("FIRECRAWL_API_URL", DEFAULT_FIRECRAWL_API_URL),
            },
            typefully: TypefullyConfig {
                api_key: typefully_key,
                api_url: optional_var("TYPEFULLY_API_URL", DEFAULT_TYPEFULLY_API_URL),
            },
            openai: OpenAiConfig {
                api_key: openai_key,
                api_url: optional_var("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
                model: optional_var("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            },
        })
    }
}

/// Read a required variable, recording its name in `missing` when it is
/// unset. A value that is empty after trimming also counts as missing, so
/// the startup diagnostic stays accurate for `VAR=` mistakes.
fn required_var(name: &'static str, missing: &mut Vec<String>) -> String {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            missing.push(name.to_string());
            String::new()
        }
    }
}

fn optional_var(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
