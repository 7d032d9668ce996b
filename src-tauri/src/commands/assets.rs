use crate::error::AppError;
use crate::models::view_types::AssetEntry;
use crate::services::fs_service;
use crate::AppSession;
use ailbums_core::RawFile;
use std::path::PathBuf;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;

fn entries(session: &AppSession) -> Vec<AssetEntry> {
    session.assets().current().iter().map(AssetEntry::from).collect()
}

fn select_paths(session: &AppSession, paths: Vec<PathBuf>) -> Result<Vec<AssetEntry>, AppError> {
    let selection = session.select(paths.into_iter().map(RawFile::from))?;
    Ok(selection.iter().map(AssetEntry::from).collect())
}

/// Opens the native multi-file picker. Cancelling keeps the current selection.
#[tauri::command]
pub async fn pick_assets(
    app: AppHandle,
    session: State<'_, AppSession>,
) -> Result<Vec<AssetEntry>, AppError> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    app.dialog()
        .file()
        .add_filter("Images", fs_service::IMAGE_EXTENSIONS)
        .pick_files(move |picked| {
            let _ = tx.send(picked);
        });

    let picked = rx.await.map_err(|_| AppError::from("File dialog closed unexpectedly"))?;
    match picked {
        Some(files) => {
            let paths = files.into_iter().filter_map(|f| f.into_path().ok()).collect();
            select_paths(&session, paths)
        }
        None => Ok(entries(&session)),
    }
}

#[tauri::command]
pub fn select_assets(
    paths: Vec<String>,
    session: State<'_, AppSession>,
) -> Result<Vec<AssetEntry>, AppError> {
    select_paths(&session, paths.into_iter().map(PathBuf::from).collect())
}

#[tauri::command]
pub fn select_folder(
    path: String,
    session: State<'_, AppSession>,
) -> Result<Vec<AssetEntry>, AppError> {
    let images = fs_service::list_image_files(&path)?;
    log::info!("Selecting {} images from {}", images.len(), path);
    select_paths(&session, images)
}

#[tauri::command]
pub fn get_selection(session: State<'_, AppSession>) -> Vec<AssetEntry> {
    entries(&session)
}
