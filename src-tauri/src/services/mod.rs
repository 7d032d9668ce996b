pub mod events;
pub mod fs_service;
pub mod thumbnail_service;
