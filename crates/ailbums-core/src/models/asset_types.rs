use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Where the bytes of an asset live.
#[derive(Debug, Clone)]
enum AssetSource {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

/// One raw input handed to the selection store by the file picker.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawFile {
    Path(PathBuf),
    Memory { name: String, data: Vec<u8> },
}

impl RawFile {
    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        RawFile::Memory {
            name: name.into(),
            data: data.into(),
        }
    }
}

impl From<PathBuf> for RawFile {
    fn from(path: PathBuf) -> Self {
        RawFile::Path(path)
    }
}

/// Immutable handle to one selected image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageAsset {
    pub index: usize,
    pub name: String,
    #[serde(skip)]
    source: AssetSource,
}

impl ImageAsset {
    pub fn from_raw(index: usize, raw: RawFile) -> Self {
        match raw {
            RawFile::Path(path) => {
                let name = display_name(&path);
                ImageAsset {
                    index,
                    name,
                    source: AssetSource::File(path),
                }
            }
            RawFile::Memory { name, data } => ImageAsset {
                index,
                name,
                source: AssetSource::Memory(data.into()),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            AssetSource::File(path) => Some(path),
            AssetSource::Memory(_) => None,
        }
    }

    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            AssetSource::File(path) => tokio::fs::read(path).await,
            AssetSource::Memory(data) => Ok(data.to_vec()),
        }
    }

    pub fn read_bytes_blocking(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            AssetSource::File(path) => std::fs::read(path),
            AssetSource::Memory(data) => Ok(data.to_vec()),
        }
    }

    /// Sniffs the content first, then falls back to the file name.
    pub fn mime_type(&self, bytes: &[u8]) -> &'static str {
        image::guess_format(bytes)
            .or_else(|_| image::ImageFormat::from_path(&self.name))
            .map(|format| format.to_mime_type())
            .unwrap_or(FALLBACK_MIME)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    #[test]
    fn path_assets_use_the_file_name() {
        let asset = ImageAsset::from_raw(3, RawFile::Path(PathBuf::from("/photos/IMG_0001.JPG")));
        assert_eq!(asset.index, 3);
        assert_eq!(asset.name(), "IMG_0001.JPG");
        assert_eq!(asset.path(), Some(Path::new("/photos/IMG_0001.JPG")));
    }

    #[test]
    fn path_without_file_name_keeps_the_whole_path() {
        let asset = ImageAsset::from_raw(0, RawFile::Path(PathBuf::from("/")));
        assert_eq!(asset.name(), "/");
    }

    #[test]
    fn mime_type_prefers_content_over_name() {
        let asset = ImageAsset::from_raw(0, RawFile::bytes("mislabelled.jpg", PNG_MAGIC));
        assert_eq!(asset.mime_type(PNG_MAGIC), "image/png");
        assert_eq!(asset.mime_type(b"not an image"), "image/jpeg");

        let unknown = ImageAsset::from_raw(0, RawFile::bytes("notes.txt", b"hello".to_vec()));
        assert_eq!(unknown.mime_type(b"hello"), FALLBACK_MIME);
    }

    #[tokio::test]
    async fn memory_assets_read_back_their_bytes() {
        let asset = ImageAsset::from_raw(0, RawFile::bytes("a.png", PNG_MAGIC));
        assert_eq!(asset.read_bytes().await.unwrap(), PNG_MAGIC);
        assert!(asset.path().is_none());
    }

    #[test]
    fn raw_file_deserializes_from_path_or_blob() {
        let path: RawFile = serde_json::from_str(r#""/tmp/a.jpg""#).unwrap();
        assert!(matches!(path, RawFile::Path(p) if p == Path::new("/tmp/a.jpg")));

        let blob: RawFile = serde_json::from_str(r#"{"name":"b.jpg","data":[1,2,3]}"#).unwrap();
        match blob {
            RawFile::Memory { name, data } => {
                assert_eq!(name, "b.jpg");
                assert_eq!(data, vec![1u8, 2, 3]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
