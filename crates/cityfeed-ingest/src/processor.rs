//! Batch slide processing
//!
//! One run: load every slide of the monitored type, resolve each slide's
//! data function, invoke the pipeline, write non-empty results back, and
//! commit the batch once. A slide whose function fails keeps its
//! last-known-good data; a blank slide is worse than a stale one.

use crate::pipeline::DataPipeline;
use crate::registry::FunctionRegistry;
use crate::store::SlideStore;
use cityfeed_common::types::FunctionDescriptor;
use cityfeed_common::{Result, Translate};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome counters for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Slides of the monitored type seen this run
    pub slides_seen: usize,
    /// Slides whose external data was rewritten
    pub slides_updated: usize,
    /// Slides left untouched (no function, unresolved, or empty result)
    pub slides_skipped: usize,
}

/// Iterates the monitored slides and drives the pipeline for each
pub struct BatchProcessor {
    registry: FunctionRegistry,
    pipeline: DataPipeline,
    store: Box<dyn SlideStore>,
    translator: Arc<dyn Translate>,
    slide_type: String,
}

impl BatchProcessor {
    pub fn new(
        registry: FunctionRegistry,
        pipeline: DataPipeline,
        store: Box<dyn SlideStore>,
        translator: Arc<dyn Translate>,
        slide_type: String,
    ) -> Self {
        BatchProcessor {
            registry,
            pipeline,
            store,
            translator,
            slide_type,
        }
    }

    /// Process every slide of the monitored type, then commit once.
    ///
    /// Pipeline failures are absorbed per slide; only a store failure
    /// (load or final commit) surfaces, and only once for the run.
    pub async fn run(&mut self) -> Result<RunStats> {
        let mut slides = self.store.find_by_type(&self.slide_type)?;
        let mut stats = RunStats {
            slides_seen: slides.len(),
            ..RunStats::default()
        };

        info!(slide_type = %self.slide_type, count = slides.len(), "Processing data feeds");

        for slide in &mut slides {
            let Some(function_id) = slide.config.data_function.clone() else {
                debug!(slide = %slide.id, "No data function configured, skipping");
                stats.slides_skipped += 1;
                continue;
            };

            let Some(entry) = self.registry.resolve(&function_id) else {
                warn!(slide = %slide.id, function = %function_id, "Unresolved data function");
                stats.slides_skipped += 1;
                continue;
            };

            let records = self
                .pipeline
                .execute(entry, &slide.config, self.translator.as_ref())
                .await;

            if records.is_empty() {
                // Transient failure or empty source: keep last-known-good data
                debug!(slide = %slide.id, function = %function_id, "Empty result, slide left unchanged");
                stats.slides_skipped += 1;
                continue;
            }

            debug!(slide = %slide.id, function = %function_id, count = records.len(), "Writing external data");
            slide.external_data = Some(records);
            slide.external_data_updated_at = Some(Utc::now());
            stats.slides_updated += 1;
        }

        self.store.commit(&slides)?;
        self.pipeline.purge_cache();

        info!(
            seen = stats.slides_seen,
            updated = stats.slides_updated,
            skipped = stats.slides_skipped,
            "Batch run complete"
        );

        Ok(stats)
    }

    /// Descriptors of every registered data function, for the picker
    pub fn available_functions(&self) -> Vec<FunctionDescriptor> {
        self.registry.list()
    }
}
