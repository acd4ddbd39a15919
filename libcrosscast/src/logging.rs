//! Logging setup shared by the crosscast binaries
//!
//! Built on `tracing` with an env-filter. Format and level come from
//! `CROSSCAST_LOG_FORMAT` and `CROSSCAST_LOG_LEVEL`; an explicit `RUST_LOG`
//! wins over both. Everything goes to stderr so stdout stays clean for
//! piped output.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text without colors, safe to pipe
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line colored output for development
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "unknown log format '{}' (expected text, json, or pretty)",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Install the global subscriber. Call once, early in main.
///
/// `level` is the fallback filter used when `RUST_LOG` is not set.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init(format: LogFormat, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .flatten_event(true)
                .with_target(true)
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }
}

/// Initialize logging from `CROSSCAST_LOG_FORMAT` and `CROSSCAST_LOG_LEVEL`,
/// falling back to text format at info level.
pub fn init_default() {
    let format = std::env::var("CROSSCAST_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var("CROSSCAST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    init(format, &level);
}
