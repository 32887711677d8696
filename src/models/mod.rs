// src/models/mod.rs

//! Data structures for records and configuration.

pub mod config;
pub mod record;

pub use config::{Config, SourceConfig, SourceVariant, StoreConfig};
pub use record::{EarthquakeRecord, RawRecord};
