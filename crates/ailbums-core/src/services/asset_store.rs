use crate::models::asset_types::{ImageAsset, RawFile};
use log::info;
use std::sync::Arc;
use tokio::sync::watch;

pub type Selection = Arc<[ImageAsset]>;

/// Holds the images chosen for the next batch.
///
/// Each selection replaces the previous one wholesale. Readers get a cheap
/// shared snapshot, so a batch started from one selection is unaffected by
/// any later `select`.
pub struct AssetStore {
    selection: watch::Sender<Selection>,
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore {
    pub fn new() -> Self {
        let (selection, _) = watch::channel(Selection::from(Vec::new()));
        Self { selection }
    }

    pub fn select<I>(&self, raw: I) -> Selection
    where
        I: IntoIterator<Item = RawFile>,
    {
        let assets: Selection = raw
            .into_iter()
            .enumerate()
            .map(|(index, file)| ImageAsset::from_raw(index, file))
            .collect();

        info!("Selected {} images", assets.len());
        self.selection.send_replace(assets.clone());
        assets
    }

    pub fn current(&self) -> Selection {
        self.selection.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.selection.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.selection.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn names(selection: &Selection) -> Vec<&str> {
        selection.iter().map(|a| a.name()).collect()
    }

    #[test]
    fn starts_empty() {
        let store = AssetStore::new();
        assert!(store.is_empty());
        assert!(store.current().is_empty());
    }

    #[test]
    fn select_keeps_input_order() {
        let store = AssetStore::new();
        let selection = store.select(vec![
            RawFile::Path(PathBuf::from("/p/c.jpg")),
            RawFile::bytes("a.jpg", vec![1]),
            RawFile::Path(PathBuf::from("/p/b.png")),
        ]);

        assert_eq!(names(&selection), ["c.jpg", "a.jpg", "b.png"]);
        let indices: Vec<usize> = selection.iter().map(|a| a.index).collect();
        assert_eq!(indices, [0, 1, 2]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn select_replaces_previous_batch() {
        let store = AssetStore::new();
        let first = store.select(vec![RawFile::bytes("a.jpg", vec![1]), RawFile::bytes("b.jpg", vec![2])]);
        store.select(vec![RawFile::bytes("z.jpg", vec![3])]);

        assert_eq!(names(&store.current()), ["z.jpg"]);
        // Earlier snapshots are untouched.
        assert_eq!(names(&first), ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn empty_selection_is_allowed() {
        let store = AssetStore::new();
        store.select(vec![RawFile::bytes("a.jpg", vec![1])]);
        let mut rx = store.subscribe();

        store.select(Vec::new());
        assert!(store.is_empty());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }
}
