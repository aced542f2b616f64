//! Completion client error types.

use thiserror::Error;

/// Errors that can occur while requesting a completion.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key was configured.
    #[error("LLM API key is not configured; set GROQ_API_KEY or OPENAI_API_KEY")]
    MissingApiKey,

    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the response could not be read.
    #[error("Completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Completion API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The response had no usable content.
    #[error("Failed to generate README")]
    EmptyCompletion,
}
