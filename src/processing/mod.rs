//! Document request pipeline: validation, scoped storage, extraction and summarization.

pub mod sanitize;
mod service;
mod storage;
pub mod types;

pub use service::{DocumentPipeline, DocumentService};
pub use types::{ProcessError, SummaryResult, UploadedFile};
