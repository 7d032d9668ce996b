pub mod assets;
pub mod batch;
pub mod filters;
