//! Core functionality for the PitWatch machine monitoring dashboard.
//!
//! This crate provides the shared error type, structured logging setup,
//! runtime configuration and the filter/search engine used by every
//! collection view.

pub mod config;
pub mod error;
pub mod filter;
pub mod logging;

pub use config::{AppConfig, ConfigError, ConfigManager, LogFormat};
pub use error::{CoreError, Result};
pub use filter::{filter_records, filter_records_by, FieldFilters, Record, SearchQuery};
