pub mod analysis_types;
pub mod asset_types;
pub mod batch_types;
pub mod filter_types;
