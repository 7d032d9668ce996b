use crate::error::AppError;
use crate::models::view_types::{BatchProgress, BatchReport, ResultTileView};
use crate::services::thumbnail_service;
use crate::AppSession;
use ailbums_core::services::aggregator;
use ailbums_core::{BatchOutcome, BatchSummary, ProcessedItem, ResultOrder};
use tauri::State;

/// Runs the current selection to completion or first failure.
///
/// A failed batch is still a report: its `progress.error` carries the
/// message shown to the user. Only a batch that could not start is an `Err`.
#[tauri::command]
pub async fn start_batch(session: State<'_, AppSession>) -> Result<BatchReport, AppError> {
    let outcome = session.start().await;
    if let BatchOutcome::Rejected(reason) = &outcome {
        return Err((*reason).into());
    }

    let job = session.orchestrator().snapshot();
    let results = outcome
        .results()
        .map(|items| aggregator::tiles(items))
        .unwrap_or_default();

    Ok(BatchReport {
        progress: BatchProgress::from(&job),
        results,
    })
}

#[tauri::command]
pub fn get_batch_state(session: State<'_, AppSession>) -> BatchProgress {
    BatchProgress::from(&session.orchestrator().snapshot())
}

/// Tiles of the last completed batch, in submission order unless `order`
/// asks for the sharpest first.
#[tauri::command]
pub async fn get_result_tiles(
    with_thumbnails: Option<bool>,
    order: Option<ResultOrder>,
    session: State<'_, AppSession>,
) -> Result<Vec<ResultTileView>, AppError> {
    let Some(items) = session.orchestrator().snapshot().results().cloned() else {
        return Ok(Vec::new());
    };
    let order = order.unwrap_or_default();

    if !with_thumbnails.unwrap_or(false) {
        return Ok(tile_views(&items, order, false));
    }

    // Decoding is CPU bound, keep it off the IPC runtime.
    tauri::async_runtime::spawn_blocking(move || tile_views(&items, order, true))
        .await
        .map_err(|e| AppError {
            message: format!("Thumbnail task failed: {}", e),
        })
}

fn tile_views(items: &[ProcessedItem], order: ResultOrder, with_thumbnails: bool) -> Vec<ResultTileView> {
    aggregator::ordered(items, order)
        .into_iter()
        .map(|item| {
            let thumbnail = if with_thumbnails {
                match thumbnail_service::generate_thumbnail(&item.asset) {
                    Ok(uri) => Some(uri),
                    Err(e) => {
                        log::warn!("[thumb] {}: {}", item.asset.name(), e);
                        None
                    }
                }
            } else {
                None
            };
            ResultTileView {
                tile: aggregator::tile(item),
                thumbnail,
            }
        })
        .collect()
}

#[tauri::command]
pub fn get_batch_summary(session: State<'_, AppSession>) -> Option<BatchSummary> {
    session
        .orchestrator()
        .snapshot()
        .results()
        .map(|items| aggregator::summarize(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ailbums_core::{AnalysisResult, ExposureQuality, ImageAsset, RawFile};

    fn processed(index: usize, name: &str, blur_score: f64) -> ProcessedItem {
        ProcessedItem {
            asset: ImageAsset::from_raw(index, RawFile::bytes(name, b"not an image".to_vec())),
            result: AnalysisResult {
                total_score: 5.0,
                blur_score,
                eyes_open: true,
                smiling: false,
                exposure_quality: ExposureQuality::Good,
            },
        }
    }

    #[test]
    fn sharpness_order_puts_the_crispest_tile_first() {
        let items = [processed(0, "a.jpg", 12.0), processed(1, "b.jpg", 480.0), processed(2, "c.jpg", 95.0)];

        let names: Vec<String> = tile_views(&items, ResultOrder::Sharpness, false)
            .into_iter()
            .map(|view| view.tile.name)
            .collect();
        assert_eq!(names, ["b.jpg", "c.jpg", "a.jpg"]);

        let names: Vec<String> = tile_views(&items, ResultOrder::Submission, false)
            .into_iter()
            .map(|view| view.tile.name)
            .collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn undecodable_thumbnail_leaves_the_tile_without_one() {
        let items = [processed(0, "a.jpg", 12.0)];
        let views = tile_views(&items, ResultOrder::Submission, true);
        assert_eq!(views.len(), 1);
        assert!(views[0].thumbnail.is_none());
    }
}
