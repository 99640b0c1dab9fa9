//! Cityfeed Ingest Library
//!
//! The data-function registry and fetch/cache/transform pipeline behind
//! city-data display slides.
//!
//! # Data Flow
//!
//! `BatchProcessor` → `FunctionRegistry` (resolve handler) →
//! `DataPipeline` (TTL cache → fetch → parse) → source transformer →
//! normalized `MeasurementRecord` list → slide write-back.
//!
//! # Supported Source Families
//!
//! - **CKAN datastores**: open-data portal records inside a
//!   `result.records` envelope
//! - **Fixed sensor telemetry**: flat JSON objects keyed by `sensor_*`
//!   attributes, one endpoint per physical sensor
//! - **Custom URLs**: slide-configured JSON or CSV sources
//!
//! # Example
//!
//! ```no_run
//! use cityfeed_common::Catalog;
//! use cityfeed_ingest::config::IngestConfig;
//! use cityfeed_ingest::pipeline::DataPipeline;
//! use cityfeed_ingest::processor::BatchProcessor;
//! use cityfeed_ingest::registry::FunctionRegistry;
//! use cityfeed_ingest::store::JsonSlideStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::from_env();
//!     let translator = Arc::new(Catalog::embedded());
//!     let registry = FunctionRegistry::new(&config, translator.as_ref());
//!     let pipeline = DataPipeline::new(&config)?;
//!     let store = JsonSlideStore::new(&config.slides_path);
//!
//!     let mut processor = BatchProcessor::new(
//!         registry,
//!         pipeline,
//!         Box::new(store),
//!         translator,
//!         config.slide_type.clone(),
//!     );
//!     let stats = processor.run().await?;
//!     println!("{:?}", stats);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod fetch;
pub mod parse;
pub mod pipeline;
pub mod processor;
pub mod registry;
pub mod sources;
pub mod store;

// Re-export the types the host wires together
pub use config::IngestConfig;
pub use pipeline::DataPipeline;
pub use processor::{BatchProcessor, RunStats};
pub use registry::FunctionRegistry;
