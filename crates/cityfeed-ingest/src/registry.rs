//! Data-function registry
//!
//! The enumerable mapping from a stable function identifier to the source
//! it reads and the presentation metadata the picker shows. The table is
//! built once at construction; resolution is a pure lookup. The set of
//! listed ids and the set of resolvable ids are the same table, so neither
//! can drift from the other.

use crate::config::IngestConfig;
use crate::sources::telemetry::SENSOR_FIELDS;
use cityfeed_common::types::FunctionDescriptor;
use cityfeed_common::Translate;

/// What a resolved data function reads, and how
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    /// CKAN datastore with the fixed climate field table; `selector`
    /// narrows extraction to one semantic field
    CkanDatastore {
        url: String,
        selector: Option<String>,
    },
    /// Fixed telemetry endpoint, one fetch per hardcoded sensor id
    Telemetry {
        base_url: String,
        sensors: Vec<String>,
        fields: Vec<String>,
    },
    /// Solar production feed, aggregated to plant totals
    SolarAggregate { url: String },
    /// Slide supplies the URL and declared body type; `location_key`
    /// labels records the generic JSON transformer emits
    CustomUrl { location_key: Option<String> },
}

/// One registry entry: picker metadata plus the handler parameters
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub descriptor: FunctionDescriptor,
    pub source: SourceSpec,
}

/// Declaration-ordered registry of data functions
pub struct FunctionRegistry {
    entries: Vec<RegistryEntry>,
}

impl FunctionRegistry {
    /// Build the built-in function table from the configured source URLs
    pub fn new(config: &IngestConfig, translator: &dyn Translate) -> Self {
        let climate = |id: &str, selector: Option<&str>| RegistryEntry {
            descriptor: descriptor(id, "dokk1", translator),
            source: SourceSpec::CkanDatastore {
                url: config.ckan_datastore_url.clone(),
                selector: selector.map(String::from),
            },
        };

        let telemetry = |id: &str, fields: &[&str]| RegistryEntry {
            descriptor: descriptor(id, "harbor", translator),
            source: SourceSpec::Telemetry {
                base_url: config.telemetry_base_url.clone(),
                sensors: config.telemetry_sensors.clone(),
                fields: fields.iter().map(|f| f.to_string()).collect(),
            },
        };

        let entries = vec![
            climate("dokk1-climate", None),
            climate("dokk1-temperature", Some("temperature")),
            climate("dokk1-daylight", Some("daylight")),
            climate("dokk1-sound", Some("sound")),
            climate("dokk1-humidity", Some("humidity")),
            telemetry("harbor-weather", SENSOR_FIELDS),
            telemetry("harbor-water-temperature", &["water_temperature"]),
            RegistryEntry {
                descriptor: descriptor("solar-production", "energy", translator),
                source: SourceSpec::SolarAggregate {
                    url: config.solar_url.clone(),
                },
            },
            RegistryEntry {
                descriptor: descriptor("custom-url", "custom", translator),
                source: SourceSpec::CustomUrl {
                    location_key: Some("location.waterfront".to_string()),
                },
            },
        ];

        FunctionRegistry { entries }
    }

    /// Descriptors in declaration order (grouped, then by id)
    pub fn list(&self) -> Vec<FunctionDescriptor> {
        self.entries
            .iter()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    /// Resolve a function id; unknown ids are "no data", not errors
    pub fn resolve(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.descriptor.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn descriptor(id: &str, group: &str, translator: &dyn Translate) -> FunctionDescriptor {
    FunctionDescriptor {
        id: id.to_string(),
        label: translator.translate(&format!("data_function.{}", id)),
        group: translator.translate(&format!("group.{}", group)),
    }
}
