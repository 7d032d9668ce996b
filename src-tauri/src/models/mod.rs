pub mod view_types;
