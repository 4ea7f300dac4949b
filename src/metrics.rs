use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing request outcomes since startup.
#[derive(Default)]
pub struct ProcessingMetrics {
    documents_processed: AtomicU64,
    rejected_requests: AtomicU64,
    failed_requests: AtomicU64,
}

impl ProcessingMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a document that was extracted and summarized.
    pub fn record_success(&self) {
        self.documents_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a request turned away with a client error.
    pub fn record_rejection(&self) {
        self.rejected_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a request that failed inside extraction, summarization or storage.
    pub fn record_failure(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_processed: self.documents_processed.load(Ordering::Relaxed),
            rejected_requests: self.rejected_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of the request counters, served at `GET /metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Documents summarized successfully.
    pub documents_processed: u64,
    /// Requests answered with a 4xx status.
    pub rejected_requests: u64,
    /// Requests answered with a 5xx status.
    pub failed_requests: u64,
}
