//! HTTP clients for the remote services crosscast talks to
//!
//! Each client owns a `reqwest::Client`, a base URL, and the credentials for
//! one vendor. Failures are classified into [`RemoteError`] here so callers
//! never see raw `reqwest` errors.

use crate::error::RemoteError;

pub mod firecrawl;
pub mod openai;
pub mod typefully;

pub use firecrawl::{Article, FirecrawlClient};
pub use openai::OpenAiClient;
pub use typefully::{Draft, SchedulePayload, TypefullyClient};

/// Longest error-body excerpt quoted back in an error message.
const MESSAGE_LIMIT: usize = 200;

/// A request that never produced an HTTP status: DNS, connect, TLS, timeout.
pub(crate) fn transport_error(err: reqwest::Error) -> RemoteError {
    RemoteError::Transport(err.to_string())
}

/// A non-2xx response, with a short message pulled from the body.
pub(crate) fn status_error(service: &str, status: u16, body: &str) -> RemoteError {
    RemoteError::Status {
        status,
        message: format!("{}: {}", service, extract_message(body)),
    }
}

/// A 2xx response whose body did not match the expected shape.
pub(crate) fn decode_error(service: &str, err: impl std::fmt::Display) -> RemoteError {
    RemoteError::Decode(format!("{}: {}", service, err))
}

/// Pull a human-readable message out of an error body. Vendors disagree on
/// the envelope, so try the common keys before falling back to raw text.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "detail", "error"] {
            match value.get(key) {
                Some(serde_json::Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(serde_json::Value::Object(inner)) => {
                    if let Some(serde_json::Value::String(s)) = inner.get("message") {
                        if !s.is_empty() {
                            return s.clone();
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.chars().take(MESSAGE_LIMIT).collect()
    }
}
