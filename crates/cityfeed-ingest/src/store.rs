//! Slide store collaborator
//!
//! The presentation system owns slide persistence; the pipeline only needs
//! to read slides of one type and commit the batch back. `SlideStore` is
//! that seam. `JsonSlideStore` backs the stand-alone binary with a JSON
//! file; `MemorySlideStore` backs tests.

use cityfeed_common::types::Slide;
use cityfeed_common::{FeedError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Slide persistence interface.
///
/// `commit` persists the whole batch at once; the processor calls it
/// exactly once per run.
pub trait SlideStore: Send {
    /// All slides of the given type
    fn find_by_type(&self, slide_type: &str) -> Result<Vec<Slide>>;

    /// Persist the processed batch in one commit
    fn commit(&mut self, slides: &[Slide]) -> Result<()>;
}

/// In-memory store; clones share the same slide list
#[derive(Clone, Default)]
pub struct MemorySlideStore {
    slides: Arc<Mutex<Vec<Slide>>>,
}

impl MemorySlideStore {
    pub fn new(slides: Vec<Slide>) -> Self {
        MemorySlideStore {
            slides: Arc::new(Mutex::new(slides)),
        }
    }

    /// Snapshot of the stored slides
    pub fn slides(&self) -> Vec<Slide> {
        match self.slides.lock() {
            Ok(slides) => slides.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SlideStore for MemorySlideStore {
    fn find_by_type(&self, slide_type: &str) -> Result<Vec<Slide>> {
        let slides = self
            .slides
            .lock()
            .map_err(|e| FeedError::Store(e.to_string()))?;

        Ok(slides
            .iter()
            .filter(|slide| slide.slide_type == slide_type)
            .cloned()
            .collect())
    }

    fn commit(&mut self, updated: &[Slide]) -> Result<()> {
        let mut slides = self
            .slides
            .lock()
            .map_err(|e| FeedError::Store(e.to_string()))?;

        for slide in updated {
            if let Some(stored) = slides.iter_mut().find(|s| s.id == slide.id) {
                *stored = slide.clone();
            }
        }

        Ok(())
    }
}

/// JSON-file-backed store for the stand-alone binary.
///
/// The file holds the full slide list; a commit rewrites the slides of
/// the processed batch in place and leaves everything else untouched.
pub struct JsonSlideStore {
    path: PathBuf,
}

impl JsonSlideStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonSlideStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<Vec<Slide>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            FeedError::Store(format!("{}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&raw)
            .map_err(|e| FeedError::Store(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, slides: &[Slide]) -> Result<()> {
        let raw = serde_json::to_string_pretty(slides)
            .map_err(|e| FeedError::Store(e.to_string()))?;

        std::fs::write(&self.path, raw)
            .map_err(|e| FeedError::Store(format!("{}: {}", self.path.display(), e)))
    }
}

impl SlideStore for JsonSlideStore {
    fn find_by_type(&self, slide_type: &str) -> Result<Vec<Slide>> {
        let slides = self.load()?;

        let matching: Vec<Slide> = slides
            .into_iter()
            .filter(|slide| slide.slide_type == slide_type)
            .collect();

        debug!(
            path = %self.path.display(),
            slide_type = %slide_type,
            count = matching.len(),
            "Loaded slides"
        );

        Ok(matching)
    }

    fn commit(&mut self, updated: &[Slide]) -> Result<()> {
        let mut slides = self.load()?;

        for slide in updated {
            if let Some(stored) = slides.iter_mut().find(|s| s.id == slide.id) {
                *stored = slide.clone();
            }
        }

        self.save(&slides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityfeed_common::types::{MeasurementRecord, SlideConfig};
    use tempfile::tempdir;

    fn slide(id: &str, slide_type: &str) -> Slide {
        Slide {
            id: id.to_string(),
            slide_type: slide_type.to_string(),
            config: SlideConfig::default(),
            external_data: None,
            external_data_updated_at: None,
        }
    }

    #[test]
    fn test_memory_store_filters_by_type() {
        let store = MemorySlideStore::new(vec![slide("a", "city-data"), slide("b", "other")]);

        let found = store.find_by_type("city-data").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[test]
    fn test_memory_store_commit_updates_shared_list() {
        let store = MemorySlideStore::new(vec![slide("a", "city-data")]);
        let mut handle = store.clone();

        let mut updated = slide("a", "city-data");
        updated.external_data = Some(vec![MeasurementRecord::new("X", "", 1.0)]);
        handle.commit(&[updated]).unwrap();

        let slides = store.slides();
        assert!(slides[0].external_data.is_some());
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slides.json");

        let slides = vec![slide("a", "city-data"), slide("b", "other")];
        std::fs::write(&path, serde_json::to_string_pretty(&slides).unwrap()).unwrap();

        let mut store = JsonSlideStore::new(&path);
        let mut found = store.find_by_type("city-data").unwrap();
        assert_eq!(found.len(), 1);

        found[0].external_data = Some(vec![MeasurementRecord::new("X", "", 1.0)]);
        store.commit(&found).unwrap();

        // The other slide is untouched, the processed one is updated
        let reloaded: Vec<Slide> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded[0].external_data.is_some());
        assert!(reloaded[1].external_data.is_none());
    }

    #[test]
    fn test_json_store_missing_file_is_store_error() {
        let store = JsonSlideStore::new("/no/such/slides.json");
        assert!(matches!(
            store.find_by_type("city-data"),
            Err(FeedError::Store(_))
        ));
    }
}
