//! Adapters wiring the pipelines to concrete infrastructure.

pub mod json_file_store;

pub use json_file_store::JsonFilePropertyStore;
