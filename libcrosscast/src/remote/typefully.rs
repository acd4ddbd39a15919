//! Typefully draft-creation client
//!
//! One endpoint: `POST /v1/drafts/` creates an unpublished draft for manual
//! review. Auth is an `X-API-KEY: Bearer <key>` header, which is Typefully's
//! spelling, not standard `Authorization`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_error, status_error, transport_error};
use crate::config::TypefullyConfig;
use crate::error::RemoteError;

const DRAFTS_PATH: &str = "/v1/drafts/";

/// Wire payload for draft creation. `schedule_date` stays `null` so the
/// vendor stores a draft instead of auto-publishing.
#[derive(Debug, Serialize)]
pub struct SchedulePayload<'a> {
    pub content: &'a str,
    pub schedule_date: Option<&'a str>,
}

impl<'a> SchedulePayload<'a> {
    pub fn draft(content: &'a str) -> Self {
        Self {
            content,
            schedule_date: None,
        }
    }
}

/// A created draft as returned by the vendor.
#[derive(Debug, Clone, Deserialize)]
pub struct Draft {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    data: Option<DraftData>,
}

#[derive(Debug, Clone, Deserialize)]
struct DraftData {
    #[serde(default)]
    url: Option<String>,
}

impl Draft {
    /// The vendor has returned the draft URL both at the top level and nested
    /// under `data`. Prefer the top-level field, fall back to the nested one.
    pub fn url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.url.as_deref()))
    }
}

pub struct TypefullyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TypefullyClient {
    pub fn new(config: &TypefullyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Create a draft holding `content`. Returns the vendor's draft record on
    /// any 2xx response; a non-2xx status or transport failure becomes a
    /// [`RemoteError`].
    pub async fn create_draft(&self, content: &str) -> Result<Draft, RemoteError> {
        let url = format!("{}{}", self.base_url, DRAFTS_PATH);
        debug!(url = %url, content_len = content.len(), "creating Typefully draft");

        let response = self
            .http
            .post(&url)
            .header("X-API-KEY", format!("Bearer {}", self.api_key))
            .json(&SchedulePayload::draft(content))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("Typefully", status.as_u16(), &body));
        }

        response
            .json::<Draft>()
            .await
            .map_err(|e| decode_error("Typefully", e))
    }
}
