//! Chat proxy to an OpenAI-compatible completion API.
//!
//! When no API key is configured the proxy serves a canned reply instead of
//! failing, so the storefront works without the integration.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::ChatConfig;

/// Canned reply used when the chat integration is not configured.
const FALLBACK_REPLY: &str = "Thanks for reaching out! We will get back to you soon.";

/// Reply used when the upstream answer comes back empty.
const EMPTY_REPLY: &str = "Sorry, I could not generate a response.";

/// Errors from the chat upstream.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream rejected the request.
    #[error("chat API error ({status})")]
    Api { status: u16 },
}

/// A single chat message in the OpenAI format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Client for the chat completion API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<ChatClientInner>,
}

struct ChatClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl ChatClient {
    /// Create a new chat client.
    #[must_use]
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            inner: Arc::new(ChatClientInner {
                client: reqwest::Client::new(),
                endpoint: format!("{}/v1/chat/completions", config.api_base),
                api_key: config
                    .api_key
                    .as_ref()
                    .map(|key| key.expose_secret().to_string()),
                model: config.model.clone(),
            }),
        }
    }

    /// Produce a reply to a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] on transport failure or a non-success upstream
    /// response. Never errors when the integration is unconfigured.
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    pub async fn reply(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let Some(api_key) = self.inner.api_key.as_deref() else {
            return Ok(FALLBACK_REPLY.to_string());
        };

        let request = CompletionRequest {
            model: &self.inner.model,
            messages,
            max_tokens: 150,
            temperature: 0.7,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Api {
                status: status.as_u16(),
            });
        }

        let completion: CompletionResponse = response.json().await?;
        let reply = completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim())
            .filter(|content| !content.is_empty())
            .map_or_else(|| EMPTY_REPLY.to_string(), str::to_owned);

        Ok(reply)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_client_serves_canned_reply() {
        let client = ChatClient::new(&ChatConfig {
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            api_base: "https://api.openai.com".to_string(),
        });

        let reply = client
            .reply(&[ChatMessage {
                role: "user".to_string(),
                content: "Do you ship to Alaska?".to_string(),
            }])
            .await
            .unwrap();

        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[test]
    fn test_completion_response_parsing() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"  Yes we do.  "}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content.trim(), "Yes we do.");
    }
}
