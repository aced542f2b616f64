//! OpenAI-compatible chat completion client.

pub(crate) mod config;
mod error;

pub use config::{
    LlmConfig, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use error::LlmError;

use crate::prompt::Prompt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, info_span, Instrument};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Sends prompts to a chat completion endpoint.
///
/// Built once at startup and shared. Requests are never retried.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    api_key: Option<String>,
}

impl CompletionClient {
    /// Builds a client from configuration.
    ///
    /// A missing API key is not an error here; [`CompletionClient::complete`]
    /// reports it so the server can start without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(LlmError::Client)?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url().trim_end_matches('/')),
            model: config.model().to_string(),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            api_key: config.api_key().map(str::to_string),
        })
    }

    /// Returns true if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the model identifier sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Requests a completion for a system + user prompt pair.
    ///
    /// # Returns
    ///
    /// The content of the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] without sending anything if no key
    /// is configured, [`LlmError::Status`] for a non-success response and
    /// [`LlmError::EmptyCompletion`] if the first choice has no content.
    pub async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let span = info_span!("complete", model = %self.model);

        async {
            let request = ChatRequest {
                model: &self.model,
                messages: [
                    ChatMessage {
                        role: "system",
                        content: &prompt.system,
                    },
                    ChatMessage {
                        role: "user",
                        content: &prompt.user,
                    },
                ],
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            };

            debug!(endpoint = %self.endpoint, "Requesting completion");
            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(api_key)
                .json(&request)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Status { status, body });
            }

            let response: ChatResponse = response.json().await?;
            let content = response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|content| !content.trim().is_empty())
                .ok_or(LlmError::EmptyCompletion)?;

            info!(chars = content.len(), "Completion received");
            Ok(content)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn prompt() -> Prompt {
        Prompt {
            system: "You write profile READMEs.".to_string(),
            user: "GitHub Profile Information:\n- Username: @octocat".to_string(),
        }
    }

    fn client(server: &mockito::Server, api_key: Option<&str>) -> CompletionClient {
        let mut config = LlmConfig::default().with_base_url(format!("{}/v1/", server.url()));
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        CompletionClient::new(&config).unwrap()
    }

    fn completion_body(content: serde_json::Value) -> String {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn sends_two_messages_with_fixed_sampling() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": DEFAULT_MODEL,
                "temperature": DEFAULT_TEMPERATURE,
                "max_tokens": DEFAULT_MAX_TOKENS,
                "messages": [
                    {"role": "system", "content": "You write profile READMEs."},
                    {"role": "user", "content": "GitHub Profile Information:\n- Username: @octocat"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(json!("# Hi, I'm Octocat")))
            .create_async()
            .await;

        let content = client(&server, Some("test-key"))
            .complete(&prompt())
            .await
            .unwrap();

        assert_eq!(content, "# Hi, I'm Octocat");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_content_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(completion_body(json!("  \n")))
            .create_async()
            .await;

        let error = client(&server, Some("test-key"))
            .complete(&prompt())
            .await
            .unwrap_err();

        assert!(matches!(error, LlmError::EmptyCompletion));
    }

    #[tokio::test]
    async fn null_content_and_missing_choices_are_errors() {
        let mut server = mockito::Server::new_async().await;
        let _null = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(completion_body(serde_json::Value::Null))
            .expect(1)
            .create_async()
            .await;

        let client = client(&server, Some("test-key"));
        assert!(matches!(
            client.complete(&prompt()).await,
            Err(LlmError::EmptyCompletion)
        ));

        server.reset_async().await;
        let _empty = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        assert!(matches!(
            client.complete(&prompt()).await,
            Err(LlmError::EmptyCompletion)
        ));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
            .create_async()
            .await;

        let error = client(&server, Some("test-key"))
            .complete(&prompt())
            .await
            .unwrap_err();

        match error {
            LlmError::Status { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("Rate limit reached"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_api_key_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let client = client(&server, None);
        assert!(!client.has_api_key());

        let error = client.complete(&prompt()).await.unwrap_err();
        assert!(matches!(error, LlmError::MissingApiKey));
        mock.assert_async().await;
    }
}
