use crate::error::AppError;
use std::path::{Path, PathBuf};

/// Formats the analysis server can decode.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp", "tiff", "tif"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Image files directly inside `path`, sorted case-insensitively by name.
pub fn list_image_files(path: &str) -> Result<Vec<PathBuf>, AppError> {
    let dir_path = Path::new(path);
    if !dir_path.is_dir() {
        return Err(format!("Not a folder: {}", path).into());
    }

    let read_dir = std::fs::read_dir(dir_path).map_err(|e| AppError {
        message: format!("Cannot read directory {}: {}", path, e),
    })?;

    let mut images = Vec::new();

    for entry in read_dir {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let ft = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        if !ft.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        // Skip hidden files
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if is_image_file(&path) {
            images.push(path);
        }
    }

    images.sort_by_key(|p| {
        p.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_lowercase()
    });

    Ok(images)
}
