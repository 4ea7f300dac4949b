//! HTTP surface for the summarizer.
//!
//! - `POST /process` – multipart upload (`file`, optional `length`); returns
//!   `{ "extracted_text", "summary", "model_used" }` or `{ "error" }` with a 400/500 status.
//! - `GET /metrics` – request outcome counters.
//! - Everything else is served from the static directory, so `GET /` returns its `index.html`.
//!
//! CORS is permissive so the landing page can be hosted on a different origin.

use crate::config::Config;
use crate::processing::{DocumentPipeline, ProcessError, SummaryResult, UploadedFile};
use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::Instrument;
use uuid::Uuid;

/// Router-level settings taken from [`Config`].
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Directory served for non-API paths.
    pub static_dir: PathBuf,
    /// Body size limit for `POST /process`.
    pub max_upload_bytes: usize,
}

impl From<&Config> for HttpSettings {
    fn from(config: &Config) -> Self {
        Self {
            static_dir: config.static_dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

/// Build the HTTP router exposing the upload API and the landing page.
pub fn create_router<S>(service: Arc<S>, settings: HttpSettings) -> Router
where
    S: DocumentPipeline + 'static,
{
    Router::new()
        .route(
            "/process",
            post(process_document::<S>).layer(DefaultBodyLimit::max(settings.max_upload_bytes)),
        )
        .route("/metrics", get(get_metrics::<S>))
        .fallback_service(ServeDir::new(settings.static_dir))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Fields collected from the multipart form.
#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    length: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            // A `file` part without a `filename` parameter is a plain form value, not an upload.
            Some("file") if form.file.is_none() && field.file_name().is_some() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.file = Some(UploadedFile::new(file_name, bytes.to_vec()));
            }
            Some("length") if form.length.is_none() => {
                form.length = Some(field.text().await?);
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Extract text from the uploaded document and summarize it.
///
/// A request that is not `multipart/form-data` is treated as carrying no file.
async fn process_document<S>(
    State(service): State<Arc<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResult>, AppError>
where
    S: DocumentPipeline,
{
    let span = tracing::info_span!("process", request_id = %Uuid::new_v4());
    async move {
        let form = match multipart {
            Ok(multipart) => read_upload_form(multipart).await?,
            Err(rejection) => {
                tracing::debug!(%rejection, "Request is not a multipart upload");
                UploadForm::default()
            }
        };
        let result = service.process(form.file, form.length).await?;
        Ok::<_, AppError>(Json(result))
    }
    .instrument(span)
    .await
}

/// Return the request outcome counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> impl IntoResponse
where
    S: DocumentPipeline,
{
    Json(service.metrics_snapshot())
}

/// Error response rendered as `{ "error": message }`.
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<ProcessError> for AppError {
    fn from(error: ProcessError) -> Self {
        Self {
            status: error.status(),
            message: error.to_string(),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(error: MultipartError) -> Self {
        let status = error.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Self {
                status,
                message: error.body_text(),
            };
        }
        ProcessError::InvalidUpload(error.body_text()).into()
    }
}
