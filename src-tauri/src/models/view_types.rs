use ailbums_core::{BatchJob, BatchStatus, ImageAsset, ResultTile};
use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct AssetEntry {
    pub index: usize,
    pub name: String,
    pub path: Option<String>,
}

impl From<&ImageAsset> for AssetEntry {
    fn from(asset: &ImageAsset) -> Self {
        AssetEntry {
            index: asset.index,
            name: asset.name().to_string(),
            path: asset.path().map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ResultTileView {
    #[serde(flatten)]
    pub tile: ResultTile,
    pub thumbnail: Option<String>,
}

/// Payload of the `batch-progress` event and of `get_batch_state`.
#[derive(Debug, Serialize, Clone)]
pub struct BatchProgress {
    pub batch_id: u64,
    pub status: BatchStatus,
    pub current: usize,
    pub total: usize,
    pub progress_percent: f64,
    pub current_file: Option<String>,
    pub error: Option<String>,
}

impl From<&BatchJob> for BatchProgress {
    fn from(job: &BatchJob) -> Self {
        BatchProgress {
            batch_id: job.id,
            status: job.status,
            current: job.cursor,
            total: job.total,
            progress_percent: job.progress_percent,
            current_file: job.current_asset.clone(),
            error: job.error_message.clone(),
        }
    }
}

/// What `start_batch` hands back once the run has ended.
#[derive(Debug, Serialize, Clone)]
pub struct BatchReport {
    pub progress: BatchProgress,
    pub results: Vec<ResultTile>,
}
