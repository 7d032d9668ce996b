use crate::AppSession;
use ailbums_core::{FilterConfig, FilterPatch};
use tauri::State;

#[tauri::command]
pub fn get_filters(session: State<'_, AppSession>) -> FilterConfig {
    session.filters().get()
}

/// Applies a partial update. `minScore` is clamped to 0..=10 and rounded.
#[tauri::command]
pub fn update_filters(patch: FilterPatch, session: State<'_, AppSession>) -> FilterConfig {
    session.update_filters(patch)
}
