use crate::{MarginCommand, MarginUpdate, RequestId};
use pdf_margin::{Batch, MarginOptions, SourceFile, package};
use tokio::sync::mpsc;

/// A processing request waiting to run
struct PendingRequest {
    request_id: RequestId,
    sources: Vec<SourceFile>,
    options: MarginOptions,
}

/// Async worker task that processes margin commands and sends updates.
///
/// Only one request runs at a time. A newer `Process` command replaces any
/// request that is queued or still running; the replaced request is reported
/// as cancelled and never produces a result.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<MarginCommand>,
    update_tx: mpsc::UnboundedSender<MarginUpdate>,
) {
    let mut next_cmd: Option<MarginCommand> = None;

    loop {
        let cmd = match next_cmd.take() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        let mut pending = match cmd {
            MarginCommand::Process {
                request_id,
                sources,
                options,
            } => Some(PendingRequest {
                request_id,
                sources,
                options,
            }),
            MarginCommand::Cancel => None,
        };

        // Drain any queued commands, keeping only the most recent request
        while let Ok(queued) = command_rx.try_recv() {
            let replacement = match queued {
                MarginCommand::Process {
                    request_id,
                    sources,
                    options,
                } => Some(PendingRequest {
                    request_id,
                    sources,
                    options,
                }),
                MarginCommand::Cancel => None,
            };
            if let Some(old) = std::mem::replace(&mut pending, replacement) {
                log::debug!("Discarding queued request {:?}", old.request_id);
                let _ = update_tx.send(MarginUpdate::Cancelled {
                    request_id: old.request_id,
                });
            }
        }

        if let Some(request) = pending {
            next_cmd = run_request(request, &mut command_rx, &update_tx).await;
        }
    }
}

/// Run one request to completion, or until a newer command arrives.
///
/// Returns the superseding `Process` command, if that is what interrupted it.
async fn run_request(
    request: PendingRequest,
    command_rx: &mut mpsc::UnboundedReceiver<MarginCommand>,
    update_tx: &mpsc::UnboundedSender<MarginUpdate>,
) -> Option<MarginCommand> {
    let PendingRequest {
        request_id,
        sources,
        options,
    } = request;

    let mut batch = match Batch::new(sources, &options) {
        Ok(batch) => batch,
        Err(e) => {
            let _ = update_tx.send(MarginUpdate::Error {
                request_id,
                message: e.to_string(),
                failures: Vec::new(),
            });
            return None;
        }
    };

    if batch.total() == 0 {
        let _ = update_tx.send(MarginUpdate::Progress {
            request_id,
            completed: 0,
            total: 0,
            source_name: None,
        });
    }

    while let Some(progress) = batch.process_next().await {
        let _ = update_tx.send(MarginUpdate::Progress {
            request_id,
            completed: progress.completed,
            total: progress.total,
            source_name: progress.source_name,
        });

        // Once the last document is done the result is delivered regardless
        if batch.is_done() {
            break;
        }

        // Check between documents whether this request is still wanted
        match command_rx.try_recv() {
            Ok(cmd @ MarginCommand::Process { .. }) => {
                log::debug!("Request {:?} superseded by a newer one", request_id);
                let _ = update_tx.send(MarginUpdate::Cancelled { request_id });
                return Some(cmd);
            }
            Ok(MarginCommand::Cancel) => {
                log::info!("Request {:?} cancelled", request_id);
                let _ = update_tx.send(MarginUpdate::Cancelled { request_id });
                return None;
            }
            Err(_) => {}
        }
    }

    let result = batch.finish();
    let failures = result.failures.clone();

    match package(result, &options.margin) {
        Ok(deliverable) => {
            let _ = update_tx.send(MarginUpdate::Complete {
                request_id,
                deliverable,
                failures,
            });
        }
        Err(e) => {
            let _ = update_tx.send(MarginUpdate::Error {
                request_id,
                message: e.to_string(),
                failures,
            });
        }
    }

    None
}
