pub mod aggregator;
pub mod analysis_client;
pub mod asset_store;
pub mod filter_store;
pub mod orchestrator;
