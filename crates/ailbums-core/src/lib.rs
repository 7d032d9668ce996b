//! Batch submission core of Ailbums.
//!
//! A [`CullSession`] owns the image selection, the filter policy and the
//! [`BatchOrchestrator`] that sends each selected image to the analysis server
//! in turn. All state is observable through `tokio::sync::watch` receivers so
//! a view can re-render on change instead of polling.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

pub use config::ServiceConfig;
pub use error::{ConfigError, RejectReason, SessionError, SubmissionError};
pub use models::analysis_types::{AnalysisResult, ExposureQuality, ProcessedItem};
pub use models::asset_types::{ImageAsset, RawFile};
pub use models::batch_types::{BatchJob, BatchStatus};
pub use models::filter_types::{FilterConfig, FilterPatch};
pub use services::aggregator::{BatchSummary, ResultOrder, ResultTile};
pub use services::analysis_client::{AnalysisService, HttpAnalysisClient};
pub use services::asset_store::{AssetStore, Selection};
pub use services::filter_store::FilterStore;
pub use services::orchestrator::{BatchOrchestrator, BatchOutcome};
pub use session::CullSession;
