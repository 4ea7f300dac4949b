//! End-to-end tests: router → document service → Gemini client, with a mock Gemini server and a
//! stubbed extractor.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use docsum::{
    api::{HttpSettings, create_router},
    extraction::{DocumentKind, ExtractionError, TextExtractor},
    processing::DocumentService,
    summarization::{GeminiClient, Summarizer},
};
use httpmock::{Method::POST, Mock, MockServer};
use regex::Regex;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "docsum-e2e-boundary";
const MODEL: &str = "gemini-1.5-flash";

/// Returns fixed text for PDFs and a configurable text for images.
struct FixedExtractor {
    image_text: &'static str,
}

#[async_trait]
impl TextExtractor for FixedExtractor {
    async fn extract(&self, path: &Path, kind: DocumentKind) -> Result<String, ExtractionError> {
        assert!(path.exists(), "upload must be on disk during extraction");
        match kind {
            DocumentKind::Pdf => Ok("Hello  World".to_string()),
            DocumentKind::Image => Ok(self.image_text.to_string()),
        }
    }
}

struct Harness {
    app: Router,
    server: MockServer,
    upload_dir: TempDir,
    _static_dir: TempDir,
}

impl Harness {
    async fn new(image_text: &'static str) -> Self {
        let server = MockServer::start_async().await;
        let upload_dir = tempfile::tempdir().expect("upload dir");
        let static_dir = tempfile::tempdir().expect("static dir");

        let client = GeminiClient::new(server.base_url(), "test-key", Some(Duration::from_secs(5)))
            .expect("gemini client");
        let service = DocumentService::new(
            Arc::new(FixedExtractor { image_text }),
            Summarizer::new(Box::new(client), MODEL),
            Some(upload_dir.path().to_path_buf()),
        );
        let app = create_router(
            Arc::new(service),
            HttpSettings {
                static_dir: static_dir.path().to_path_buf(),
                max_upload_bytes: 1024 * 1024,
            },
        );

        Self {
            app,
            server,
            upload_dir,
            _static_dir: static_dir,
        }
    }

    async fn mock_gemini(&self, status: u16, body: Value) -> Mock<'_> {
        let path = Regex::new(r"^/models/[^/]+:generateContent$").expect("regex");
        self.server
            .mock_async(move |when, then| {
                when.method(POST)
                    .path_matches(path.clone())
                    .query_param("key", "test-key");
                then.status(status).json_body(body.clone());
            })
            .await
    }

    async fn upload(&self, parts: &[(&str, Option<&str>, &[u8])]) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/process")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(multipart_body(parts)))
                    .expect("request"),
            )
            .await
            .expect("router response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    fn stored_uploads(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .expect("read upload dir")
            .count()
    }
}

fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match file_name {
            Some(file_name) => format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            ),
            None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn candidates(text: &str) -> Value {
    json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    })
}

#[tokio::test]
async fn pdf_upload_returns_text_summary_and_model() {
    let harness = Harness::new("").await;
    let expected_prompt = "Summarize the following document in a short summary of about 50 words, focusing only on the core idea:\n\nHello  World";
    let gemini = harness
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/models/{MODEL}:generateContent"))
                .query_param("key", "test-key")
                .json_body(json!({ "contents": [{ "parts": [{ "text": expected_prompt }] }] }));
            then.status(200).json_body(candidates("Two words.\n"));
        })
        .await;

    let (status, body) = harness
        .upload(&[
            ("file", Some("Report.PDF"), b"%PDF-1.4"),
            ("length", None, b"short"),
        ])
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        body,
        json!({
            "extracted_text": "Hello  World",
            "summary": "Two words.",
            "model_used": MODEL
        })
    );
    gemini.assert_hits_async(1).await;
    assert_eq!(harness.stored_uploads(), 0);
}

#[tokio::test]
async fn missing_file_is_400() {
    let harness = Harness::new("text").await;
    let gemini = harness.mock_gemini(200, candidates("unused")).await;

    let (status, body) = harness.upload(&[("length", None, b"medium")]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No file uploaded" }));
    gemini.assert_hits_async(0).await;
}

#[tokio::test]
async fn text_file_is_400_invalid_type() {
    let harness = Harness::new("text").await;
    let gemini = harness.mock_gemini(200, candidates("unused")).await;

    let (status, body) = harness.upload(&[("file", Some("doc.txt"), b"plain")]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid file type" }));
    gemini.assert_hits_async(0).await;
    assert_eq!(harness.stored_uploads(), 0);
}

#[tokio::test]
async fn blank_image_is_400_and_never_summarized() {
    let harness = Harness::new("").await;
    let gemini = harness.mock_gemini(200, candidates("unused")).await;

    let (status, body) = harness.upload(&[("file", Some("blank.png"), b"\x89PNG")]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No text extracted from file" }));
    gemini.assert_hits_async(0).await;
    assert_eq!(harness.stored_uploads(), 0);
}

#[tokio::test]
async fn empty_candidates_is_500() {
    let harness = Harness::new("Scanned words").await;
    harness.mock_gemini(200, json!({ "candidates": [] })).await;

    let (status, body) = harness.upload(&[("file", Some("scan.jpg"), b"jpeg")]).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "No summary returned from Gemini" }));
    assert_eq!(harness.stored_uploads(), 0);
}

#[tokio::test]
async fn provider_error_message_is_passed_through() {
    let harness = Harness::new("Scanned words").await;
    harness
        .mock_gemini(
            429,
            json!({ "error": { "code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED" } }),
        )
        .await;

    let (status, body) = harness.upload(&[("file", Some("scan.jpeg"), b"jpeg")]).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Resource has been exhausted" }));
}

#[tokio::test]
async fn repeated_uploads_are_idempotent() {
    let harness = Harness::new("Scanned words").await;
    let gemini = harness.mock_gemini(200, candidates("Deterministic summary")).await;
    let parts: &[(&str, Option<&str>, &[u8])] =
        &[("file", Some("scan.png"), b"png bytes"), ("length", None, b"long")];

    let first = harness.upload(parts).await;
    let second = harness.upload(parts).await;

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first, second);
    gemini.assert_hits_async(2).await;
}

#[tokio::test]
async fn file_field_without_filename_is_missing_file() {
    let harness = Harness::new("text").await;
    let gemini = harness.mock_gemini(200, candidates("unused")).await;

    let (status, body) = harness.upload(&[("file", None, b"just a text field")]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No file uploaded" }));
    gemini.assert_hits_async(0).await;
}

#[tokio::test]
async fn empty_filename_is_invalid_type() {
    let harness = Harness::new("text").await;
    let gemini = harness.mock_gemini(200, candidates("unused")).await;

    let (status, body) = harness.upload(&[("file", Some(""), b"bytes")]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid file type" }));
    gemini.assert_hits_async(0).await;
    assert_eq!(harness.stored_uploads(), 0);
}
