//! Firecrawl article scraping client
//!
//! Calls `POST /v1/scrape` asking for markdown. Firecrawl wraps failures in a
//! 200 response with `success: false`, so a successful HTTP exchange can
//! still come back as [`RemoteError::Rejected`].

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{decode_error, status_error, transport_error};
use crate::config::FirecrawlConfig;
use crate::error::RemoteError;

const SCRAPE_PATH: &str = "/v1/scrape";

/// Title used when the scraped page has no title metadata.
pub const UNTITLED: &str = "Untitled Article";

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Option<ScrapeData>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    metadata: Option<ScrapeMetadata>,
}

#[derive(Debug, Deserialize)]
struct ScrapeMetadata {
    #[serde(default)]
    title: Option<String>,
}

/// A scraped article ready for content generation.
#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub url: Url,
}

pub struct FirecrawlClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirecrawlClient {
    pub fn new(config: &FirecrawlConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Scrape one article as markdown.
    pub async fn scrape(&self, url: &Url) -> Result<Article, RemoteError> {
        debug!(url = %url, "scraping article");

        let request = ScrapeRequest {
            url: url.as_str(),
            formats: ["markdown"],
        };

        let response = self
            .http
            .post(format!("{}{}", self.base_url, SCRAPE_PATH))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("Firecrawl", status.as_u16(), &body));
        }

        let scraped = response
            .json::<ScrapeResponse>()
            .await
            .map_err(|e| decode_error("Firecrawl", e))?;

        if !scraped.success {
            let reason = scraped.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(RemoteError::Rejected(format!(
                "Firecrawl scraping failed: {}",
                reason
            )));
        }

        let data = scraped
            .data
            .ok_or_else(|| decode_error("Firecrawl", "scrape succeeded without data"))?;
        let content = data
            .markdown
            .ok_or_else(|| decode_error("Firecrawl", "scrape succeeded without markdown"))?;
        let title = data
            .metadata
            .and_then(|m| m.title)
            .unwrap_or_else(|| UNTITLED.to_string());

        debug!(title = %title, chars = content.len(), "article scraped");

        Ok(Article {
            title,
            content,
            url: url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> FirecrawlConfig {
        FirecrawlConfig {
            api_key: "fc-key".to_string(),
            api_url: base_url.to_string(),
        }
    }

    fn article_url() -> Url {
        Url::parse("https://example.com/article").unwrap()
    }

    #[tokio::test]
    async fn test_scrape_requests_markdown_with_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .and(header("authorization", "Bearer fc-key"))
            .and(body_json(serde_json::json!({
                "url": "https://example.com/article",
                "formats": ["markdown"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": {
                    "markdown": "# Heading\n\nBody text.",
                    "metadata": {"title": "A Real Title"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = FirecrawlClient::new(&test_config(&server.uri()));
        let article = client.scrape(&article_url()).await.unwrap();
        assert_eq!(article.title, "A Real Title");
        assert_eq!(article.content, "# Heading\n\nBody text.");
        assert_eq!(article.url, article_url());
    }

    #[tokio::test]
    async fn test_scrape_missing_title_falls_back_to_untitled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": {"markdown": "body", "metadata": {}}
            })))
            .mount(&server)
            .await;

        let client = FirecrawlClient::new(&test_config(&server.uri()));
        let article = client.scrape(&article_url()).await.unwrap();
        assert_eq!(article.title, UNTITLED);
    }

    #[tokio::test]
    async fn test_scrape_vendor_rejection_carries_its_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error": "This website is not supported"
            })))
            .mount(&server)
            .await;

        let client = FirecrawlClient::new(&test_config(&server.uri()));
        let err = client.scrape(&article_url()).await.unwrap_err();
        assert!(matches!(err, RemoteError::Rejected(_)));
        assert_eq!(
            err.to_string(),
            "Firecrawl scraping failed: This website is not supported"
        );
    }

    #[tokio::test]
    async fn test_scrape_http_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(serde_json::json!({"error": "rate limited"})),
            )
            .mount(&server)
            .await;

        let client = FirecrawlClient::new(&test_config(&server.uri()));
        let err = client.scrape(&article_url()).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 429: Firecrawl: rate limited");
    }

    #[tokio::test]
    async fn test_scrape_success_without_markdown_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": {"metadata": {"title": "t"}}
            })))
            .mount(&server)
            .await;

        let client = FirecrawlClient::new(&test_config(&server.uri()));
        let err = client.scrape(&article_url()).await.unwrap_err();
        assert!(matches!(err, RemoteError::Decode(_)));
    }
}
