//! Core data types and error definitions for the request pipeline.

use crate::extraction::ExtractionError;
use crate::summarization::SummarizationError;
use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// A file received in the `file` part of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as declared by the client, unsanitized.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Pair a declared filename with its contents.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Outcome of a fully processed document, serialized as the `POST /process` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    /// Text recovered from the document.
    pub extracted_text: String,
    /// Summary produced by the model.
    pub summary: String,
    /// Identifier of the model that produced the summary.
    pub model_used: String,
}

/// Errors emitted by the document pipeline.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The request carried no `file` part.
    #[error("No file uploaded")]
    MissingFile,
    /// The filename's extension is not pdf, png, jpg or jpeg.
    #[error("Invalid file type")]
    InvalidFileType,
    /// The multipart body could not be read.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
    /// Extraction succeeded but produced no text.
    #[error("No text extracted from file")]
    NoTextExtracted,
    /// Extraction backend failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// Summarization provider failed.
    #[error(transparent)]
    Summarization(#[from] SummarizationError),
    /// The upload could not be written to scoped storage.
    #[error("Failed to store upload: {0}")]
    Storage(#[from] std::io::Error),
    /// Anything else, e.g. a panicked blocking task.
    #[error("{0}")]
    Unexpected(String),
}

impl ProcessError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::InvalidFileType | Self::InvalidUpload(_) | Self::NoTextExtracted => {
                StatusCode::BAD_REQUEST
            }
            Self::Extraction(_) | Self::Summarization(_) | Self::Storage(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
