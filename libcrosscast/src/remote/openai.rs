//! OpenAI chat-completion client for content generation
//!
//! Prompts ask the model for a JSON object (`response_format: json_object`)
//! so replies deserialize straight into the channel content types.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_error, status_error, transport_error};
use crate::config::OpenAiConfig;
use crate::error::RemoteError;
use crate::types::{LinkedInPost, TwitterThread};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 2000;

const TWITTER_PROMPT: &str = include_str!("../../prompts/twitter.txt");
const LINKEDIN_PROMPT: &str = include_str!("../../prompts/linkedin.txt");

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
    max_tokens: u32,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// Substitute `{{title}}` and `{{content}}` into a prompt template.
fn render_prompt(template: &str, title: &str, content: &str) -> String {
    template
        .replace("{{title}}", title)
        .replace("{{content}}", content)
}

fn parse_reply<T: serde::de::DeserializeOwned>(reply: &str) -> Result<T, RemoteError> {
    serde_json::from_str(reply)
        .map_err(|e| decode_error("OpenAI", format!("reply is not the expected JSON shape: {}", e)))
}

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Generate a Twitter thread for an article.
    pub async fn generate_twitter_thread(
        &self,
        title: &str,
        content: &str,
    ) -> Result<TwitterThread, RemoteError> {
        let prompt = render_prompt(TWITTER_PROMPT, title, content);
        let reply = self.complete(&prompt).await?;
        parse_reply(&reply)
    }

    /// Generate a LinkedIn post for an article.
    pub async fn generate_linkedin_post(
        &self,
        title: &str,
        content: &str,
    ) -> Result<LinkedInPost, RemoteError> {
        let prompt = render_prompt(LINKEDIN_PROMPT, title, content);
        let reply = self.complete(&prompt).await?;
        parse_reply(&reply)
    }

    /// Run one chat completion and return the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, RemoteError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "requesting completion");

        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .http
            .post(format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("OpenAI", status.as_u16(), &body));
        }

        let completion = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| decode_error("OpenAI", e))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| decode_error("OpenAI", "completion contained no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> OpenAiConfig {
        OpenAiConfig {
            api_key: "sk-test".to_string(),
            api_url: base_url.to_string(),
            model: "gpt-4o".to_string(),
        }
    }

    fn completion_body(reply: &serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": reply.to_string()}}]
        })
    }

    #[test]
    fn test_render_prompt_replaces_both_placeholders() {
        let rendered = render_prompt(
            "Write about {{title}}.\n\n{{content}}\n\nTitle again: {{title}}",
            "Rust",
            "Some body",
        );
        assert_eq!(rendered, "Write about Rust.\n\nSome body\n\nTitle again: Rust");
    }

    #[test]
    fn test_parse_reply_reads_thread_shape() {
        let thread: TwitterThread =
            parse_reply(r#"{"thread": [{"content": "t1"}, {"content": "t2"}]}"#).unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread.thread[1].content, "t2");
    }

    #[test]
    fn test_parse_reply_rejects_non_json() {
        let result: Result<LinkedInPost, _> = parse_reply("Sorry, I can't do that.");
        assert!(matches!(result, Err(RemoteError::Decode(_))));
    }

    #[tokio::test]
    async fn test_generate_twitter_thread_posts_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o",
                "temperature": 0.7,
                "max_tokens": 2000,
                "response_format": {"type": "json_object"}
            })))
            .and(body_string_contains("Rust in Production"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
                &serde_json::json!({"thread": [{"content": "t1"}, {"content": "t2"}]}),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&test_config(&server.uri()));
        let thread = client
            .generate_twitter_thread("Rust in Production", "article body")
            .await
            .unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread.thread[0].content, "t1");
    }

    #[tokio::test]
    async fn test_generate_linkedin_post_parses_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
                &serde_json::json!({"post": "Exciting news about Rust."}),
            )))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&test_config(&server.uri()));
        let post = client.generate_linkedin_post("t", "c").await.unwrap();
        assert_eq!(post.post, "Exciting news about Rust.");
    }

    #[tokio::test]
    async fn test_empty_choices_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&test_config(&server.uri()));
        let err = client.generate_linkedin_post("t", "c").await.unwrap_err();
        assert!(matches!(err, RemoteError::Decode(_)));
        assert!(err.to_string().contains("no choices"));
    }

    #[tokio::test]
    async fn test_quota_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(&test_config(&server.uri()));
        let err = client.generate_twitter_thread("t", "c").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP 429: OpenAI: You exceeded your current quota"
        );
    }
}
