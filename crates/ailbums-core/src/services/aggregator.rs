use crate::models::analysis_types::{ExposureQuality, ProcessedItem};
use crate::models::batch_types::{BatchJob, BatchStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::watch;

/// Display record for one analysed image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTile {
    pub index: usize,
    pub name: String,
    pub path: Option<String>,
    pub total_score: f64,
    pub blur_score: f64,
    pub score_label: String,
    pub blur_label: String,
    pub eyes_open: bool,
    pub smiling: bool,
    pub exposure: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExposureBreakdown {
    pub good: usize,
    pub underexposed: usize,
    pub overexposed: usize,
    pub other: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub count: usize,
    pub mean_score: Option<f64>,
    pub eyes_open: usize,
    pub smiling: usize,
    pub exposure: ExposureBreakdown,
}

pub fn tile(item: &ProcessedItem) -> ResultTile {
    let result = &item.result;
    ResultTile {
        index: item.asset.index,
        name: item.asset.name().to_string(),
        path: item.asset.path().map(|p| p.to_string_lossy().to_string()),
        total_score: result.total_score,
        blur_score: result.blur_score,
        score_label: format!("{:.1}", result.total_score),
        blur_label: format!("{:.0}", result.blur_score),
        eyes_open: result.eyes_open,
        smiling: result.smiling,
        exposure: result.exposure_quality.to_string(),
    }
}

/// Tiles in submission order.
pub fn tiles(items: &[ProcessedItem]) -> Vec<ResultTile> {
    items.iter().map(tile).collect()
}

/// How result tiles are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrder {
    #[default]
    Submission,
    Sharpness,
}

pub fn ordered(items: &[ProcessedItem], order: ResultOrder) -> Vec<&ProcessedItem> {
    match order {
        ResultOrder::Submission => items.iter().collect(),
        ResultOrder::Sharpness => rank_by_sharpness(items),
    }
}

pub fn ordered_tiles(items: &[ProcessedItem], order: ResultOrder) -> Vec<ResultTile> {
    ordered(items, order).into_iter().map(tile).collect()
}

pub fn summarize(items: &[ProcessedItem]) -> BatchSummary {
    let mut summary = BatchSummary {
        count: items.len(),
        ..BatchSummary::default()
    };

    let mut score_sum = 0.0;
    for item in items {
        let result = &item.result;
        score_sum += result.total_score;
        if result.eyes_open {
            summary.eyes_open += 1;
        }
        if result.smiling {
            summary.smiling += 1;
        }
        match result.exposure_quality {
            ExposureQuality::Good => summary.exposure.good += 1,
            ExposureQuality::Underexposed => summary.exposure.underexposed += 1,
            ExposureQuality::Overexposed => summary.exposure.overexposed += 1,
            ExposureQuality::Other(_) => summary.exposure.other += 1,
        }
    }

    if !items.is_empty() {
        summary.mean_score = Some(score_sum / items.len() as f64);
    }
    summary
}

/// Sharpest first. Ties keep submission order.
pub fn rank_by_sharpness(items: &[ProcessedItem]) -> Vec<&ProcessedItem> {
    let mut ranked: Vec<&ProcessedItem> = items.iter().collect();
    ranked.sort_by(|a, b| {
        b.result
            .blur_score
            .partial_cmp(&a.result.blur_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Waits until the observed batch has finished (immediately if it already has).
/// `Some` with its results on completion, `None` when the batch failed or the
/// orchestrator went away.
pub async fn wait_for_results(rx: &mut watch::Receiver<BatchJob>) -> Option<Arc<[ProcessedItem]>> {
    let job = rx.wait_for(|job| job.status.is_finished()).await.ok()?;
    match job.status {
        BatchStatus::Completed => job.results.clone(),
        _ => None,
    }
}
