#![deny(missing_docs)]

//! Core library for the document summarization server.

/// HTTP routing and request handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// PDF and OCR text extraction.
pub mod extraction;
/// Structured logging and tracing setup.
pub mod logging;
/// Request outcome counters.
pub mod metrics;
/// Document request pipeline.
pub mod processing;
/// Prompt construction and Gemini summarization client.
pub mod summarization;
