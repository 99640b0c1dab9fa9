//! Common types used across cityfeed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The canonical normalized output unit of the pipeline.
///
/// Every transformer produces an ordered sequence of these; the presentation
/// system renders them as-is. `name`, `unit`, and `value` are always
/// present; `location` and `timestamp` depend on what the source can say.
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Display label for the measurement (already translated)
    pub name: String,

    /// Display unit (already translated, e.g. "°C", "Lux")
    pub unit: String,

    /// Label of the physical installation, when the source has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Source-supplied timestamp; upstream feeds emit both epoch numbers
    /// and ISO strings, so the union is kept as-is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Value>,

    /// Numeric reading
    pub value: f64,
}

impl MeasurementRecord {
    /// Create a record with no location or timestamp
    pub fn new(name: impl Into<String>, unit: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            location: None,
            timestamp: None,
            value,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: serde_json::Value) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Presentation metadata for one registry entry.
///
/// `id` is the stable key slides reference; `label` and `group` feed the
/// slide-configuration picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub id: String,
    pub label: String,
    pub group: String,
}

/// Declared body format of a data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Json,
    Csv,
}

impl DataType {
    /// All supported body types, in the order the picker lists them
    pub fn all() -> &'static [DataType] {
        &[DataType::Json, DataType::Csv]
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Json => write!(f, "json"),
            DataType::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for DataType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(DataType::Json),
            "csv" => Ok(DataType::Csv),
            _ => Err(anyhow::anyhow!("Invalid data type: {}", s)),
        }
    }
}

/// Per-slide data configuration, owned by the presentation system.
///
/// Absence of `data_function` means no data is attached this cycle.
/// `data_url`/`data_type` only matter for generic custom-URL functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SlideConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_function: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,

    #[serde(default)]
    pub data_type: DataType,
}

/// An external presentation unit that displays data.
///
/// Read from and written back to the slide store collaborator; this core
/// only ever touches `external_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Store-assigned identifier
    pub id: String,

    /// Slide type; only slides of the monitored type are processed
    pub slide_type: String,

    /// The slide's data configuration block
    #[serde(default)]
    pub config: SlideConfig,

    /// Last successfully produced record sequence, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_data: Option<Vec<MeasurementRecord>>,

    /// When `external_data` was last written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_data_updated_at: Option<DateTime<Utc>>,
}
