//! Layered configuration for the FieldOps agent tools.
//!
//! This crate provides:
//! - [`FieldOpsConfig`]: the root configuration with namespaced sections
//! - [`load_merged`]: two-layer loading (global + local) with env overrides
//! - [`schema`]: JSON Schema generation for editor support
//! - [`validation`]: advisory validation that produces warnings
//!
//! # Configuration Precedence (lowest to highest)
//! 1. Default values
//! 2. Global config (`~/.config/fieldops/fieldops.json`)
//! 3. Local config (`./fieldops.json`)
//! 4. Environment variables
//!
//! # Example
//! ```no_run
//! use fieldops_config::load_merged;
//! use std::path::Path;
//!
//! let loaded = load_merged(Path::new(".")).unwrap();
//! println!("API: {}", loaded.config.services.api.base_url);
//!
//! for warning in &loaded.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! ```
//!
//! # Environment Variables
//! - `FIELDOPS_API_BASE_URL`: override the REST API base URL
//! - `FIELDOPS_API_KEY`: bearer credential (env-only, never written to files)
//! - `FIELDOPS_GEOCODER_URL`: override the geocoder base URL
//! - `FIELDOPS_GEOCODER_USER_AGENT`: override the geocoder `User-Agent`
//! - `FIELDOPS_COVERAGE_CONCURRENCY`: boundary synthesis concurrency
//! - `FIELDOPS_LOG_LEVEL`: log level
//! - `FIELDOPS_LOG_JSON`: enable JSON logging ("true" or "1")

pub mod loader;
pub mod merge;
pub mod schema;
pub mod types;
pub mod validation;
pub mod writer;

pub use loader::{LoadedFieldOpsConfig, load_merged};
pub use schema::schema_json_pretty;
pub use types::FieldOpsConfig;
