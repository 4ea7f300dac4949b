use super::{DocumentKind, ExtractionError, TextExtractor};
use async_trait::async_trait;
use image::{ImageFormat, ImageReader};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::process::Command;

/// OCR backend that shells out to the Tesseract CLI.
///
/// The upload is decoded first, converted to grayscale and re-encoded as PNG in a scoped
/// scratch file, so Tesseract only ever sees a well-formed image regardless of the upload's
/// original encoding.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    binary: String,
    language: String,
}

impl TesseractOcr {
    /// Create a backend invoking `binary` with the `language` model (e.g. `eng`).
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    async fn run(&self, image: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .map_err(|error| {
                ExtractionError::OcrUnavailable(format!("failed to run {}: {error}", self.binary))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Ocr(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Decode the upload and write a grayscale PNG copy next to it.
fn normalize_image(source: &Path) -> Result<NamedTempFile, ExtractionError> {
    let decoded = ImageReader::open(source)?
        .with_guessed_format()?
        .decode()
        .map_err(|error| ExtractionError::ImageDecode(error.to_string()))?;
    tracing::debug!(
        width = decoded.width(),
        height = decoded.height(),
        "Decoded image for OCR"
    );

    let directory = source.parent().unwrap_or_else(|| Path::new("."));
    let scratch = tempfile::Builder::new()
        .prefix("docsum-ocr-")
        .suffix(".png")
        .tempfile_in(directory)?;
    decoded
        .to_luma8()
        .save_with_format(scratch.path(), ImageFormat::Png)
        .map_err(|error| ExtractionError::ImageDecode(error.to_string()))?;
    Ok(scratch)
}

#[async_trait]
impl TextExtractor for TesseractOcr {
    async fn extract(&self, path: &Path, _kind: DocumentKind) -> Result<String, ExtractionError> {
        let source: PathBuf = path.to_path_buf();
        let scratch = tokio::task::spawn_blocking(move || normalize_image(&source))
            .await
            .map_err(|error| ExtractionError::Task(error.to_string()))??;

        self.run(scratch.path()).await
    }
}
