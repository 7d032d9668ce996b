use crate::models::view_types::{AssetEntry, BatchProgress, BatchReport};
use crate::AppSession;
use ailbums_core::services::aggregator;
use ailbums_core::BatchStatus;
use tauri::{AppHandle, Emitter};
use tokio::sync::watch;

pub const SELECTION_CHANGED: &str = "selection-changed";
pub const FILTERS_CHANGED: &str = "filters-changed";
pub const BATCH_PROGRESS: &str = "batch-progress";
pub const BATCH_COMPLETE: &str = "batch-complete";

/// Re-publishes every store and batch change to the webview.
pub fn forward_session_updates(app: &AppHandle, session: &AppSession) {
    forward(app.clone(), session.assets().subscribe(), |app, selection| {
        let entries: Vec<AssetEntry> = selection.iter().map(AssetEntry::from).collect();
        let _ = app.emit(SELECTION_CHANGED, entries);
    });

    forward(app.clone(), session.filters().subscribe(), |app, filters| {
        let _ = app.emit(FILTERS_CHANGED, *filters);
    });

    forward(app.clone(), session.orchestrator().subscribe(), |app, job| {
        let progress = BatchProgress::from(job);
        let _ = app.emit(BATCH_PROGRESS, progress.clone());

        if job.status == BatchStatus::Completed {
            let results = job.results().map(|r| aggregator::tiles(r)).unwrap_or_default();
            let _ = app.emit(BATCH_COMPLETE, BatchReport { progress, results });
        }
    });
}

fn forward<T, F>(app: AppHandle, mut rx: watch::Receiver<T>, publish: F)
where
    T: Send + Sync + 'static,
    F: Fn(&AppHandle, &T) + Send + 'static,
{
    tauri::async_runtime::spawn(async move {
        // Ends when the session (the sender) is dropped.
        while rx.changed().await.is_ok() {
            let value = rx.borrow_and_update();
            publish(&app, &value);
        }
    });
}
