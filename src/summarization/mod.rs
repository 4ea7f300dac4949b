//! Abstractive summaries from a remote generative-text model.
//!
//! [`Summarizer`] turns extracted text plus a [`LengthPreset`] into a prompt and hands it to a
//! [`SummarizationClient`]. The production client talks to Gemini's `generateContent` endpoint;
//! tests plug in stubs or point the Gemini client at a mock server.

mod gemini;
mod prompt;

pub use gemini::GeminiClient;
pub use prompt::{LengthPreset, build_prompt};

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced while requesting a summary.
#[derive(Debug, Error)]
pub enum SummarizationError {
    /// Nothing to summarize.
    #[error("Cannot summarize empty text")]
    EmptyInput,
    /// The provider could not be reached.
    #[error("Failed to reach summarization provider: {0}")]
    Transport(String),
    /// The provider answered with a non-success status; carries its error message.
    #[error("{0}")]
    Api(String),
    /// The provider answered successfully but without any summary text.
    #[error("No summary returned from Gemini")]
    NoSummary,
    /// The provider response could not be decoded.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Request payload passed to the summarization provider.
#[derive(Debug, Clone)]
pub struct SummarizationRequest {
    /// Model identifier understood by the provider.
    pub model: String,
    /// Fully assembled prompt.
    pub prompt: String,
}

/// Interface implemented by summarization providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Issue a single generation call and return the trimmed summary text.
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationError>;
}

/// Prompt construction plus one provider call per document.
pub struct Summarizer {
    client: Box<dyn SummarizationClient>,
    model: String,
}

impl Summarizer {
    /// Wrap a provider client together with the model it should use.
    pub fn new(client: Box<dyn SummarizationClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Model identifier reported alongside each summary.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Summarize `text` at the requested length. No retry is attempted on failure.
    pub async fn summarize(
        &self,
        text: &str,
        preset: LengthPreset,
    ) -> Result<String, SummarizationError> {
        if text.trim().is_empty() {
            return Err(SummarizationError::EmptyInput);
        }

        let prompt = build_prompt(text, preset);
        tracing::debug!(
            model = %self.model,
            ?preset,
            prompt_chars = prompt.len(),
            "Requesting summary"
        );
        self.client
            .generate_summary(SummarizationRequest {
                model: self.model.clone(),
                prompt,
            })
            .await
    }
}
