//! Chat-completions transport.
//!
//! [`ChatClient`] is the seam between prompt construction and HTTP. The
//! production [`OpenAiChatClient`] speaks the OpenAI-compatible
//! `/chat/completions` API, which local servers (Ollama, vLLM, llama.cpp)
//! expose as well.

use crate::config::FileReasonerConfig;
use agora_application::ReasonerError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// One message of a chat request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// A single completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Sends a chat request and returns the assistant's text
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ReasonerError>;
}

/// `reqwest` client for OpenAI-compatible endpoints
pub struct OpenAiChatClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiChatClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ReasonerError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ReasonerError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    /// Build from `[reasoner]`, reading the key from the configured
    /// environment variable. A missing key is allowed for local servers.
    pub fn from_config(config: &FileReasonerConfig) -> Result<Self, ReasonerError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!(
                "{} is not set; sending requests without an API key",
                config.api_key_env
            );
        }
        Self::new(
            &config.base_url,
            api_key,
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ReasonerError> {
        debug!("POST {} (model {})", self.endpoint, request.model);

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ReasonerError::Timeout
            } else {
                ReasonerError::RequestFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReasonerError::RequestFailed(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ReasonerError::RequestFailed(format!("invalid response body: {}", e)))?;

        extract_content(&body)
    }
}

/// Pull `choices[0].message.content` out of a completion response.
fn extract_content(body: &serde_json::Value) -> Result<String, ReasonerError> {
    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .trim();
    if content.is_empty() {
        return Err(ReasonerError::EmptyResponse);
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = OpenAiChatClient::new("http://localhost:11434/v1/", None, None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage::system("be brief"), ChatMessage::user("2+2?")],
            temperature: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "2+2?");
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_extract_content() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  The answer is 4.\n"}}]
        });
        assert_eq!(extract_content(&body).unwrap(), "The answer is 4.");

        let empty = serde_json::json!({"choices": []});
        assert_eq!(extract_content(&empty), Err(ReasonerError::EmptyResponse));
    }
}
