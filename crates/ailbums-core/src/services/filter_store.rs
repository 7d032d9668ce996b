use crate::models::filter_types::{clamp_min_score, FilterConfig, FilterPatch};
use log::debug;
use tokio::sync::watch;

/// Holds the current filter policy and notifies subscribers on every change.
pub struct FilterStore {
    state: watch::Sender<FilterConfig>,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

impl FilterStore {
    pub fn new(initial: FilterConfig) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    pub fn get(&self) -> FilterConfig {
        *self.state.borrow()
    }

    /// Applies `patch` and returns the stored policy. A NaN `min_score` is ignored.
    pub fn update(&self, patch: FilterPatch) -> FilterConfig {
        let mut updated = self.get();
        self.state.send_if_modified(|config| {
            let before = *config;
            if let Some(eyes) = patch.eyes {
                config.eyes = eyes;
            }
            if let Some(smile) = patch.smile {
                config.smile = smile;
            }
            if let Some(duplicates) = patch.duplicates {
                config.duplicates = duplicates;
            }
            if let Some(min_score) = patch.min_score.and_then(clamp_min_score) {
                config.min_score = min_score;
            }
            updated = *config;
            before != *config
        });

        debug!("Filter policy now {:?}", updated);
        updated
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterConfig> {
        self.state.subscribe()
    }
}
