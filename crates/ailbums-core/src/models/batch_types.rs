use crate::models::analysis_types::ProcessedItem;
use crate::models::filter_types::FilterConfig;
use serde::Serialize;
use std::sync::Arc;

pub const INTERRUPTED_MESSAGE: &str = "Processing was interrupted before the batch finished.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Idle,
    Running,
    Completed,
    Failed,
}

impl BatchStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, BatchStatus::Completed | BatchStatus::Failed)
    }
}

/// Observable state of one batch run.
///
/// `cursor` counts successfully analysed items and only moves forward.
/// `results` stays `None` until the whole batch has completed.
#[derive(Debug, Clone, Serialize)]
pub struct BatchJob {
    pub id: u64,
    pub status: BatchStatus,
    pub total: usize,
    pub cursor: usize,
    pub progress_percent: f64,
    pub current_asset: Option<String>,
    pub error_message: Option<String>,
    pub failed_asset: Option<String>,
    pub filters: Option<FilterConfig>,
    #[serde(skip)]
    pub results: Option<Arc<[ProcessedItem]>>,
}

impl BatchJob {
    pub fn idle() -> Self {
        Self {
            id: 0,
            status: BatchStatus::Idle,
            total: 0,
            cursor: 0,
            progress_percent: 0.0,
            current_asset: None,
            error_message: None,
            failed_asset: None,
            filters: None,
            results: None,
        }
    }

    pub fn running(id: u64, total: usize, filters: FilterConfig) -> Self {
        Self {
            id,
            status: BatchStatus::Running,
            total,
            filters: Some(filters),
            ..Self::idle()
        }
    }

    pub(crate) fn begin_item(&mut self, name: &str) {
        self.current_asset = Some(name.to_string());
    }

    pub(crate) fn advance(&mut self, cursor: usize) {
        debug_assert!(cursor > self.cursor && cursor <= self.total);
        self.cursor = cursor;
        self.progress_percent = percent(cursor, self.total);
    }

    pub(crate) fn fail(&mut self, asset: &str, message: String) {
        self.status = BatchStatus::Failed;
        self.current_asset = None;
        self.failed_asset = Some(asset.to_string());
        self.error_message = Some(message);
    }

    /// The run stopped without resolving its current item.
    pub(crate) fn interrupt(&mut self) {
        let asset = self.current_asset.take();
        self.status = BatchStatus::Failed;
        self.failed_asset = asset;
        self.error_message = Some(INTERRUPTED_MESSAGE.to_string());
    }

    pub(crate) fn complete(&mut self, results: Arc<[ProcessedItem]>) {
        self.status = BatchStatus::Completed;
        self.current_asset = None;
        self.cursor = self.total;
        self.progress_percent = 100.0;
        self.results = Some(results);
    }

    pub fn is_running(&self) -> bool {
        self.status == BatchStatus::Running
    }

    pub fn results(&self) -> Option<&Arc<[ProcessedItem]>> {
        self.results.as_ref()
    }
}

fn percent(cursor: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (100.0 * cursor as f64 / total as f64).min(100.0)
}
