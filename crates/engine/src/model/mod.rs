pub mod ollama;

use std::future::Future;

use reqwest::StatusCode;
use thiserror::Error;

pub use ollama::OllamaModel;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("error invoking model '{model}': {source}")]
    Request {
        model: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("model backend returned an error: {0}")]
    Backend(String),
    #[error("model backend responded with status {0}")]
    Status(StatusCode),
    #[error("model backend returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Text-generation service the agent asks for decisions.
pub trait ModelBackend {
    /// Generates a completion for `prompt` under the `system` instruction.
    ///
    /// The returned text is expected, not guaranteed, to be a JSON decision.
    fn generate(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;
}
