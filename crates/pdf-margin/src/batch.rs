//! Batch processing of several documents with one margin request
//!
//! Documents are processed strictly one after another, in input order. A
//! document that fails to load or transform is recorded as a failure and the
//! batch moves on to the next one.

use crate::options::MarginOptions;
use crate::process::process_pdf_bytes;
use crate::types::*;

/// A batch in progress.
///
/// Each call to [`Batch::process_next`] handles exactly one document, so a
/// host can report progress, check for cancellation, or drop the batch
/// between documents. Dropping it never surfaces a partial result.
#[derive(Debug)]
pub struct Batch {
    pending: std::vec::IntoIter<SourceFile>,
    options: MarginOptions,
    total: usize,
    completed: usize,
    result: BatchResult,
}

impl Batch {
    /// Start a batch. Fails with [`MarginError::InvalidConfig`] before any
    /// document is touched if the options are invalid.
    pub fn new(sources: Vec<SourceFile>, options: &MarginOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            total: sources.len(),
            pending: sources.into_iter(),
            options: options.clone(),
            completed: 0,
            result: BatchResult::default(),
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }

    /// Process the next document. Returns `None` once every document has
    /// been processed.
    pub async fn process_next(&mut self) -> Option<BatchProgress> {
        let source = self.pending.next()?;
        let SourceFile { name, bytes } = source;
        let options = self.options.clone();

        log::debug!("Processing '{}' ({} bytes)", name, bytes.len());

        // The source bytes are dropped on the blocking pool once processed
        let outcome =
            match tokio::task::spawn_blocking(move || process_pdf_bytes(&bytes, &options)).await {
                Ok(outcome) => outcome,
                Err(e) => Err(MarginError::TaskJoin(e)),
            };

        let succeeded = outcome.is_ok();
        match outcome {
            Ok(bytes) => {
                log::info!("Added margin to '{}' ({} bytes)", name, bytes.len());
                self.result.outputs.push(ProcessedOutput {
                    source_name: name.clone(),
                    bytes,
                });
            }
            Err(e) => {
                log::warn!("Skipping '{}': {}", name, e);
                self.result.failures.push(DocumentFailure {
                    source_name: name.clone(),
                    error: e.to_string(),
                });
            }
        }

        self.completed += 1;

        // Let the host publish progress before the next document
        tokio::task::yield_now().await;

        Some(BatchProgress {
            completed: self.completed,
            total: self.total,
            source_name: Some(name),
            succeeded,
        })
    }

    /// Consume the batch and return what has been collected so far
    pub fn finish(self) -> BatchResult {
        log::info!(
            "Batch finished: {} succeeded, {} failed",
            self.result.outputs.len(),
            self.result.failures.len()
        );
        self.result
    }
}

/// Run a whole batch, calling `on_progress` after every document.
///
/// The final progress event always has `completed == total`; an empty batch
/// reports a single `(0, 0)` event.
pub async fn run_batch<F>(
    sources: Vec<SourceFile>,
    options: &MarginOptions,
    mut on_progress: F,
) -> Result<BatchResult>
where
    F: FnMut(&BatchProgress),
{
    let mut batch = Batch::new(sources, options)?;

    if batch.total() == 0 {
        on_progress(&BatchProgress {
            completed: 0,
            total: 0,
            source_name: None,
            succeeded: true,
        });
    }

    while let Some(progress) = batch.process_next().await {
        on_progress(&progress);
    }

    Ok(batch.finish())
}
