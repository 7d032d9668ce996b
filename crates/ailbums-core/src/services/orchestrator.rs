use crate::error::{RejectReason, SubmissionError};
use crate::models::analysis_types::ProcessedItem;
use crate::models::batch_types::{BatchJob, BatchStatus};
use crate::models::filter_types::FilterConfig;
use crate::services::analysis_client::AnalysisService;
use crate::services::asset_store::Selection;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// How a call to [`BatchOrchestrator::run`] ended.
#[derive(Debug)]
pub enum BatchOutcome {
    Completed(Arc<[ProcessedItem]>),
    /// `cursor` items succeeded before `error`; their results were discarded.
    Failed {
        cursor: usize,
        error: SubmissionError,
    },
    Rejected(RejectReason),
}

impl BatchOutcome {
    pub fn results(&self) -> Option<&Arc<[ProcessedItem]>> {
        match self {
            BatchOutcome::Completed(results) => Some(results),
            _ => None,
        }
    }
}

/// Submits a selection one image at a time and publishes the batch state.
///
/// Submissions are strictly sequential: the next image is only sent once the
/// previous request has resolved. The first failure ends the batch and no
/// partial results are published.
pub struct BatchOrchestrator<S> {
    service: S,
    state: watch::Sender<BatchJob>,
    next_id: AtomicU64,
}

impl<S: AnalysisService> BatchOrchestrator<S> {
    pub fn new(service: S) -> Self {
        let (state, _) = watch::channel(BatchJob::idle());
        Self {
            service,
            state,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn snapshot(&self) -> BatchJob {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BatchJob> {
        self.state.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().is_running()
    }

    /// Drops a finished batch, clearing its error and results. No-op while running.
    pub fn reset(&self) -> bool {
        self.reset_with(|| ()).is_some()
    }

    /// Runs `action` and resets the job as one step, unless a batch is running.
    ///
    /// The job stays locked for the duration of `action`, so a concurrent
    /// [`run`](Self::run) cannot claim it in between.
    pub fn reset_with<R>(&self, action: impl FnOnce() -> R) -> Option<R> {
        let mut output = None;
        self.state.send_if_modified(|job| {
            if job.is_running() {
                return false;
            }
            output = Some(action());
            if job.status == BatchStatus::Idle {
                return false;
            }
            *job = BatchJob::idle();
            true
        });
        output
    }

    pub async fn run(&self, items: Selection, filters: FilterConfig) -> BatchOutcome {
        if items.is_empty() {
            return BatchOutcome::Rejected(RejectReason::EmptyBatch);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let claimed = self.state.send_if_modified(|job| {
            if job.is_running() {
                return false;
            }
            *job = BatchJob::running(id, items.len(), filters);
            true
        });
        if !claimed {
            warn!("Batch {} rejected: another batch is running", id);
            return BatchOutcome::Rejected(RejectReason::AlreadyRunning);
        }

        let _interrupt = InterruptGuard { state: &self.state, id };

        info!("Batch {} started with {} images", id, items.len());
        let mut processed = Vec::with_capacity(items.len());

        for (index, asset) in items.iter().enumerate() {
            self.state.send_modify(|job| job.begin_item(asset.name()));

            match self.service.analyze(asset).await {
                Ok(result) => {
                    debug!(
                        "Batch {}: {} scored {:.1} ({}/{})",
                        id,
                        asset.name(),
                        result.total_score,
                        index + 1,
                        items.len()
                    );
                    processed.push(ProcessedItem {
                        asset: asset.clone(),
                        result,
                    });
                    self.state.send_modify(|job| job.advance(index + 1));
                }
                Err(error) => {
                    let message = error.user_message(asset.name());
                    warn!("Batch {} failed on {}: {}", id, asset.name(), error);
                    if !processed.is_empty() {
                        info!(
                            "Batch {}: discarding {} results gathered before the failure",
                            id,
                            processed.len()
                        );
                    }
                    self.state.send_modify(|job| job.fail(asset.name(), message));
                    return BatchOutcome::Failed {
                        cursor: index,
                        error,
                    };
                }
            }
        }

        let results: Arc<[ProcessedItem]> = processed.into();
        self.state.send_modify(|job| job.complete(results.clone()));
        info!("Batch {} completed: {} images analysed", id, results.len());
        BatchOutcome::Completed(results)
    }
}

/// Fails the claimed job when `run` is dropped before reaching a verdict.
struct InterruptGuard<'a> {
    state: &'a watch::Sender<BatchJob>,
    id: u64,
}

impl Drop for InterruptGuard<'_> {
    fn drop(&mut self) {
        let id = self.id;
        let interrupted = self.state.send_if_modified(|job| {
            if job.id != id || !job.is_running() {
                return false;
            }
            job.interrupt();
            true
        });
        if interrupted {
            warn!("Batch {} interrupted before it finished", id);
        }
    }
}
