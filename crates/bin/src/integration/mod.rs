//! Integration glue between the CLI and the library crates.
//!
//! Provides the cached data pipeline (Yahoo Finance + SQLite), the
//! platform cache location, and the universe CSV loader.

pub(crate) mod cache_manager;
pub(crate) mod data_pipeline;
pub(crate) mod universe_csv;
