use crate::error::SessionError;
use crate::models::asset_types::RawFile;
use crate::models::filter_types::{FilterConfig, FilterPatch};
use crate::services::analysis_client::AnalysisService;
use crate::services::asset_store::{AssetStore, Selection};
use crate::services::filter_store::FilterStore;
use crate::services::orchestrator::{BatchOrchestrator, BatchOutcome};
use log::debug;

/// The selection, the filter policy and the orchestrator of one window.
pub struct CullSession<S> {
    assets: AssetStore,
    filters: FilterStore,
    orchestrator: BatchOrchestrator<S>,
}

impl<S: AnalysisService> CullSession<S> {
    pub fn new(service: S) -> Self {
        Self::with_filters(service, FilterConfig::default())
    }

    pub fn with_filters(service: S, filters: FilterConfig) -> Self {
        Self {
            assets: AssetStore::new(),
            filters: FilterStore::new(filters),
            orchestrator: BatchOrchestrator::new(service),
        }
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    pub fn orchestrator(&self) -> &BatchOrchestrator<S> {
        &self.orchestrator
    }

    /// Replaces the selection and forgets the previous batch, error included.
    pub fn select<I>(&self, raw: I) -> Result<Selection, SessionError>
    where
        I: IntoIterator<Item = RawFile>,
    {
        self.orchestrator
            .reset_with(|| self.assets.select(raw))
            .ok_or(SessionError::BatchRunning)
    }

    pub fn update_filters(&self, patch: FilterPatch) -> FilterConfig {
        self.filters.update(patch)
    }

    /// Runs the current selection under the current filter policy.
    pub async fn start(&self) -> BatchOutcome {
        let items = self.assets.current();
        let filters = self.filters.get();
        debug!("Starting batch of {} images with {:?}", items.len(), filters);
        self.orchestrator.run(items, filters).await
    }
}
