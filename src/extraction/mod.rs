//! Text extraction from uploaded documents.
//!
//! PDFs are parsed page by page with `lopdf`; images are normalized with the `image` crate and
//! handed to Tesseract. Both variants sit behind [`TextExtractor`] so the request pipeline can be
//! driven by stubs in tests.

mod ocr;
mod pdf;

pub use ocr::TesseractOcr;
pub use pdf::{PdfTextExtractor, assemble_pages};

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Which extraction branch a stored upload is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Paginated PDF document.
    Pdf,
    /// Raster image (PNG or JPEG) that needs OCR.
    Image,
}

impl DocumentKind {
    /// Classify a sanitized filename: `.pdf` (any case) is a PDF, everything else an image.
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.to_ascii_lowercase().ends_with(".pdf") {
            Self::Pdf
        } else {
            Self::Image
        }
    }
}

/// Errors raised while turning a stored upload into plain text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The PDF could not be opened or parsed.
    #[error("Failed to read PDF: {0}")]
    Pdf(String),
    /// The image could not be opened or decoded.
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),
    /// The OCR engine could not be launched.
    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),
    /// The OCR engine ran but reported a failure.
    #[error("OCR failed: {0}")]
    Ocr(String),
    /// Scratch I/O around the extraction failed.
    #[error("Extraction I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A blocking extraction task panicked or was cancelled.
    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Interface implemented by extraction backends.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract trimmed plain text from the file at `path`.
    async fn extract(&self, path: &Path, kind: DocumentKind) -> Result<String, ExtractionError>;
}

/// Routes each document to the PDF or OCR backend based on its [`DocumentKind`].
pub struct DocumentExtractor {
    pdf: PdfTextExtractor,
    ocr: TesseractOcr,
}

impl DocumentExtractor {
    /// Combine the two extraction backends.
    pub fn new(pdf: PdfTextExtractor, ocr: TesseractOcr) -> Self {
        Self { pdf, ocr }
    }

    /// Build both backends from the loaded configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            PdfTextExtractor,
            TesseractOcr::new(&config.tesseract_cmd, &config.ocr_language),
        )
    }
}

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, path: &Path, kind: DocumentKind) -> Result<String, ExtractionError> {
        tracing::debug!(?kind, path = %path.display(), "Extracting text");
        match kind {
            DocumentKind::Pdf => self.pdf.extract(path, kind).await,
            DocumentKind::Image => self.ocr.extract(path, kind).await,
        }
    }
}
