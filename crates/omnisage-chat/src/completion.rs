//! Chat-completion collaborator.
//!
//! Defines the outbound request shape and an HTTP client for an
//! OpenAI-compatible `/chat/completions` endpoint.

use async_trait::async_trait;
use omnisage_core::config::{CompletionConfig, OPENAI_API_KEY_VAR};
use omnisage_core::error::OmniSageError;
use omnisage_core::types::Role;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// One `{role, content}` entry of an outbound message list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Body of a completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Service that turns a message list into one reply.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ChatError>;
}

// =============================================================================
// OpenAI
// =============================================================================

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Client for the OpenAI Chat Completions API.
#[derive(Clone)]
pub struct OpenAiCompletionClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiCompletionClient {
    /// Create a client. A missing `api_key` is reported on every call, not here.
    pub fn new(config: &CompletionConfig, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ChatError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(OmniSageError::MissingCredential(OPENAI_API_KEY_VAR))?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(ChatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatError::MalformedResponse("response has no reply content".to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_stub;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![
                ChatMessage::new(Role::System, "persona"),
                ChatMessage::new(Role::User, "hello"),
            ],
            temperature: 0.7,
        }
    }

    fn client_for(base_url: String, key: Option<&str>) -> OpenAiCompletionClient {
        OpenAiCompletionClient::new(&CompletionConfig { base_url }, key.map(str::to_string))
    }

    #[test]
    fn test_request_serializes_to_openai_shape() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "hello");
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let client = client_for("http://127.0.0.1:9/v1".to_string(), None);
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let authed = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer sk-test");
                if !authed || body["messages"].as_array().map(Vec::len) != Some(2) {
                    return (StatusCode::BAD_REQUEST, Json(serde_json::json!({})));
                }
                (
                    StatusCode::OK,
                    Json(serde_json::json!({
                        "choices": [
                            {"message": {"role": "assistant", "content": "Paris"}},
                            {"message": {"role": "assistant", "content": "Lyon"}}
                        ]
                    })),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(format!("{}/v1", base), Some("sk-test"));

        assert_eq!(client.complete(&request()).await.unwrap(), "Paris");
    }

    #[tokio::test]
    async fn test_http_error_is_api_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "Incorrect API key provided") }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(format!("{}/v1", base), Some("sk-bad"));

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, ChatError::Api { status: 401, .. }));
        assert!(err.to_string().contains("Incorrect API key"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_malformed() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(serde_json::json!({"choices": []})) }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(format!("{}/v1", base), Some("sk-test"));

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, ChatError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_null_content_is_malformed() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                Json(serde_json::json!({"choices": [{"message": {"content": null}}]}))
            }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(format!("{}/v1", base), Some("sk-test"));

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, ChatError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = client_for("http://127.0.0.1:1/v1".to_string(), Some("sk-test"));
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }
}
