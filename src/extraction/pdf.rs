use super::{DocumentKind, ExtractionError, TextExtractor};
use async_trait::async_trait;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Extracts embedded text from PDF pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    fn extract_blocking(path: &Path) -> Result<String, ExtractionError> {
        let document =
            Document::load(path).map_err(|error| ExtractionError::Pdf(error.to_string()))?;
        let pages = document.get_pages();
        tracing::debug!(pages = pages.len(), "Loaded PDF");

        let texts = pages.keys().map(|&page_number| {
            match document.extract_text(&[page_number]) {
                Ok(text) => Some(text),
                Err(error) => {
                    tracing::debug!(page = page_number, %error, "Page yielded no text");
                    None
                }
            }
        });

        Ok(assemble_pages(texts))
    }
}

/// Join per-page text in page order and trim the result.
///
/// A page without text contributes nothing and no separator is inserted between pages. lopdf
/// already ends each page's text objects with `\n`, so a two-page document reading "Hello " and
/// "World" comes out as `"Hello \nWorld"`.
pub fn assemble_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    let joined: String = pages.into_iter().flatten().collect();
    joined.trim().to_string()
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path, _kind: DocumentKind) -> Result<String, ExtractionError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_blocking(&path))
            .await
            .map_err(|error| ExtractionError::Task(error.to_string()))?
    }
}
