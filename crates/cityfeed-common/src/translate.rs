//! Label translation lookup
//!
//! The presentation system owns the real translation service; the pipeline
//! only needs a lookup seam. `Translate` is that seam, and `Catalog` is a
//! YAML-backed implementation with an embedded English catalog so the
//! binary works stand-alone.

use std::collections::HashMap;

/// Embedded default catalog (English)
const DEFAULT_CATALOG: &str = include_str!("../resources/messages.en.yml");

/// Label lookup interface injected into transformers and the registry
pub trait Translate: Send + Sync {
    /// Resolve a translation key to a display string.
    ///
    /// Unknown keys echo the key itself, so a missing catalog entry shows
    /// up on the slide instead of blanking the label.
    fn translate(&self, key: &str) -> String;
}

/// Flat key/value translation catalog loaded from YAML
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Empty catalog; every lookup echoes its key
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a catalog from a flat YAML mapping
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let entries: HashMap<String, String> = serde_yaml::from_str(yaml)?;
        Ok(Self { entries })
    }

    /// The embedded English catalog
    pub fn embedded() -> Self {
        Self::from_yaml(DEFAULT_CATALOG).unwrap_or_else(|_| Self::empty())
    }

    /// Number of catalog entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(value) => value.clone(),
            None => key.to_string(),
        }
    }
}
