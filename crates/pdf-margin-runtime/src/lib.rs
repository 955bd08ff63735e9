mod worker;

pub use worker::worker_task;

// Re-export types from the engine crate
pub use pdf_margin::{
    BatchResult, Deliverable, DocumentFailure, MarginConfig, MarginOptions, MarginSide, RangeMode,
    SourceFile,
};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum MarginCommand {
    /// Add margins to a list of documents. Supersedes any request still
    /// queued or in flight.
    Process {
        request_id: RequestId,
        sources: Vec<SourceFile>,
        options: MarginOptions,
    },
    /// Abandon the request in flight, if any
    Cancel,
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum MarginUpdate {
    Progress {
        request_id: RequestId,
        completed: usize,
        total: usize,
        source_name: Option<String>,
    },
    Complete {
        request_id: RequestId,
        deliverable: Deliverable,
        failures: Vec<DocumentFailure>,
    },
    Cancelled {
        request_id: RequestId,
    },
    Error {
        request_id: RequestId,
        message: String,
        failures: Vec<DocumentFailure>,
    },
}

/// Handle to a processing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);
