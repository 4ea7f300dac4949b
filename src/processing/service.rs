//! Request pipeline: validate, persist, extract, summarize, respond.

use crate::{
    config::Config,
    extraction::{DocumentExtractor, DocumentKind, TextExtractor},
    metrics::{MetricsSnapshot, ProcessingMetrics},
    processing::{
        sanitize::{is_allowed_file, sanitize_file_name},
        storage::persist_upload,
        types::{ProcessError, SummaryResult, UploadedFile},
    },
    summarization::{GeminiClient, LengthPreset, Summarizer},
};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::Arc;

/// Abstraction over the document pipeline used by the HTTP surface.
#[async_trait]
pub trait DocumentPipeline: Send + Sync {
    /// Run one upload through the full pipeline.
    ///
    /// `upload` is `None` when the request had no `file` part; `length` is the raw form value.
    async fn process(
        &self,
        upload: Option<UploadedFile>,
        length: Option<String>,
    ) -> Result<SummaryResult, ProcessError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Coordinates validation, scoped storage, extraction and summarization for each upload.
///
/// Holds no per-request state; construct once at startup and share through an `Arc`.
pub struct DocumentService {
    extractor: Arc<dyn TextExtractor>,
    summarizer: Summarizer,
    upload_dir: Option<PathBuf>,
    metrics: Arc<ProcessingMetrics>,
}

impl DocumentService {
    /// Assemble a service from explicit collaborators.
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        summarizer: Summarizer,
        upload_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            summarizer,
            upload_dir,
            metrics: Arc::new(ProcessingMetrics::new()),
        }
    }

    /// Wire the production extractor and Gemini client from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ProcessError> {
        let client = GeminiClient::from_config(config)?;
        Ok(Self::new(
            Arc::new(DocumentExtractor::from_config(config)),
            Summarizer::new(Box::new(client), config.gemini_model.clone()),
            config.upload_dir.clone(),
        ))
    }

    async fn run(
        &self,
        upload: Option<UploadedFile>,
        length: Option<String>,
    ) -> Result<SummaryResult, ProcessError> {
        let upload = upload.ok_or(ProcessError::MissingFile)?;
        if !is_allowed_file(&upload.file_name) {
            return Err(ProcessError::InvalidFileType);
        }

        let preset = LengthPreset::from_param(length.as_deref());
        let file_name = sanitize_file_name(&upload.file_name);
        let kind = DocumentKind::from_file_name(&file_name);
        tracing::info!(
            file_name = %file_name,
            bytes = upload.bytes.len(),
            digest = %hex::encode(Sha256::digest(&upload.bytes)),
            ?kind,
            ?preset,
            "Processing upload"
        );

        let bytes = upload.bytes;
        let directory = self.upload_dir.clone();
        let stored = tokio::task::spawn_blocking(move || persist_upload(&bytes, directory.as_deref()))
            .await
            .map_err(|error| ProcessError::Unexpected(error.to_string()))??;

        let extracted = self.extractor.extract(stored.path(), kind).await;
        if let Err(error) = stored.close() {
            tracing::warn!(%error, "Failed to remove stored upload");
        }
        let extracted_text = extracted?;
        if extracted_text.is_empty() {
            return Err(ProcessError::NoTextExtracted);
        }
        tracing::debug!(chars = extracted_text.len(), "Extracted text");

        let summary = self.summarizer.summarize(&extracted_text, preset).await?;
        Ok(SummaryResult {
            extracted_text,
            summary,
            model_used: self.summarizer.model().to_string(),
        })
    }
}

#[async_trait]
impl DocumentPipeline for DocumentService {
    async fn process(
        &self,
        upload: Option<UploadedFile>,
        length: Option<String>,
    ) -> Result<SummaryResult, ProcessError> {
        match self.run(upload, length).await {
            Ok(result) => {
                self.metrics.record_success();
                tracing::info!(
                    model = %result.model_used,
                    summary_chars = result.summary.len(),
                    "Document summarized"
                );
                Ok(result)
            }
            Err(error) if error.status().is_client_error() => {
                self.metrics.record_rejection();
                tracing::info!(%error, "Upload rejected");
                Err(error)
            }
            Err(error) => {
                self.metrics.record_failure();
                tracing::error!(%error, "Document processing failed");
                Err(error)
            }
        }
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
