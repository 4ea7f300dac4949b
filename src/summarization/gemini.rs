use super::{SummarizationClient, SummarizationError, SummarizationRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const FALLBACK_ERROR_MESSAGE: &str = "Gemini API failed";

/// Client for Gemini's `models/{model}:generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client for `base_url` with an optional per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SummarizationError> {
        let mut builder = Client::builder().user_agent("docsum/summary");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|error| {
            SummarizationError::Transport(format!("failed to build HTTP client: {error}"))
        })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from the loaded configuration.
    pub fn from_config(config: &crate::config::Config) -> Result<Self, SummarizationError> {
        Self::new(
            config.gemini_base_url.clone(),
            config.gemini_api_key.clone(),
            config.gemini_timeout_secs.map(Duration::from_secs),
        )
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[async_trait]
impl SummarizationClient for GeminiClient {
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationError> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }]
        });

        let response = self
            .http
            .post(self.endpoint(&request.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|error| SummarizationError::Transport(error.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| SummarizationError::Transport(error.without_url().to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<GenerateContentResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .and_then(|error| error.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            tracing::warn!(%status, %message, model = %request.model, "Gemini request failed");
            return Err(SummarizationError::Api(message));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&body)
            .map_err(|error| SummarizationError::InvalidResponse(error.to_string()))?;

        let summary = parsed
            .first_text()
            .map(|text| text.trim().to_string())
            .unwrap_or_default();
        if summary.is_empty() {
            return Err(SummarizationError::NoSummary);
        }
        Ok(summary)
    }
}
