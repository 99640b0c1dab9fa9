//! Cityfeed Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, error handling, and collaborator interfaces for the
//! cityfeed workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all cityfeed
//! workspace members:
//!
//! - **Error Handling**: The pipeline error taxonomy and result type
//! - **Logging**: Centralized tracing initialization
//! - **Types**: Measurement records, function descriptors, slide config
//! - **Translation**: The label-lookup collaborator interface
//!
//! # Example
//!
//! ```no_run
//! use cityfeed_common::{FeedError, Result};
//! use cityfeed_common::types::MeasurementRecord;
//!
//! fn check(record: &MeasurementRecord) -> Result<()> {
//!     if record.name.is_empty() {
//!         return Err(FeedError::SchemaMismatch("empty record name".into()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod translate;
pub mod types;

// Re-export commonly used types
pub use error::{FeedError, Result};
pub use translate::{Catalog, Translate};
