//! Fetch/cache/transform pipeline
//!
//! Composes the response cache, fetcher, and body parsers, and executes a
//! resolved registry entry against them. Every failure is absorbed here:
//! a handler invocation yields records or an empty list, never an error,
//! so one misbehaving source cannot block the other slides.

use crate::cache::ResponseCache;
use crate::config::IngestConfig;
use crate::fetch::Fetcher;
use crate::parse::{parse_body, ParsedBody};
use crate::registry::{RegistryEntry, SourceSpec};
use crate::sources::{ckan, csv_table, solar, telemetry};
use cityfeed_common::types::{DataType, MeasurementRecord, SlideConfig};
use cityfeed_common::{Result, Translate};
use std::time::Duration;
use tracing::{debug, warn};

/// The fetch-with-cache pipeline shared by all data functions
pub struct DataPipeline {
    fetcher: Fetcher,
    cache: ResponseCache,
}

impl DataPipeline {
    pub fn new(config: &IngestConfig) -> Result<Self> {
        Ok(DataPipeline {
            fetcher: Fetcher::new(Duration::from_secs(config.fetch_timeout_secs))?,
            cache: ResponseCache::new(Duration::from_secs(config.cache_ttl_secs)),
        })
    }

    /// Fetch and parse a URL through the cache.
    ///
    /// A live cache entry short-circuits the network call. Failures are
    /// returned, not stored; the next call retries.
    pub async fn fetch_parsed(&mut self, url: &str, data_type: DataType) -> Result<ParsedBody> {
        if let Some(body) = self.cache.get(url) {
            return Ok(body);
        }

        let raw = self.fetcher.get(url).await?;
        let body = parse_body(&raw, data_type)?;
        self.cache.insert(url, body.clone());

        Ok(body)
    }

    /// Execute one resolved data function.
    ///
    /// Returns the normalized records, or an empty list on any failure
    /// (logged, never propagated).
    pub async fn execute(
        &mut self,
        entry: &RegistryEntry,
        slide_config: &SlideConfig,
        translator: &dyn Translate,
    ) -> Vec<MeasurementRecord> {
        match &entry.source {
            SourceSpec::CkanDatastore { url, selector } => {
                match self.fetch_parsed(url, DataType::Json).await {
                    Ok(body) => {
                        let Some(json) = body.as_json() else {
                            return Vec::new();
                        };
                        ckan::climate_records(json, selector.as_deref(), translator)
                    },
                    Err(e) => {
                        warn!(function = %entry.descriptor.id, error = %e, "CKAN fetch failed");
                        Vec::new()
                    },
                }
            },

            SourceSpec::Telemetry {
                base_url,
                sensors,
                fields,
            } => {
                let mut records = Vec::new();

                // One fetch per sensor; a failing sensor skips only itself
                for sensor in sensors {
                    let url = format!("{}?sensor={}", base_url, sensor);
                    match self.fetch_parsed(&url, DataType::Json).await {
                        Ok(body) => {
                            if let Some(json) = body.as_json() {
                                records.extend(telemetry::sensor_records(
                                    json, fields, translator,
                                ));
                            }
                        },
                        Err(e) => {
                            warn!(sensor = %sensor, error = %e, "Telemetry fetch failed");
                        },
                    }
                }

                records
            },

            SourceSpec::SolarAggregate { url } => {
                match self.fetch_parsed(url, DataType::Json).await {
                    Ok(body) => {
                        let Some(json) = body.as_json() else {
                            return Vec::new();
                        };
                        solar::production_records(json, translator)
                    },
                    Err(e) => {
                        warn!(function = %entry.descriptor.id, error = %e, "Solar fetch failed");
                        Vec::new()
                    },
                }
            },

            SourceSpec::CustomUrl { location_key } => {
                let Some(url) = slide_config.data_url.as_deref() else {
                    debug!(function = %entry.descriptor.id, "Slide has no custom URL configured");
                    return Vec::new();
                };

                match self.fetch_parsed(url, slide_config.data_type).await {
                    Ok(ParsedBody::Json(json)) => {
                        ckan::generic_records(&json, location_key.as_deref(), translator)
                    },
                    Ok(ParsedBody::Csv(rows)) => csv_table::table_records(&rows),
                    Err(e) => {
                        warn!(url = %url, error = %e, "Custom URL fetch failed");
                        Vec::new()
                    },
                }
            },
        }
    }

    /// Drop expired cache entries; the processor calls this between runs
    pub fn purge_cache(&mut self) {
        self.cache.purge_expired();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityfeed_common::types::FunctionDescriptor;
    use cityfeed_common::Catalog;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(ttl_secs: u64) -> IngestConfig {
        IngestConfig::default()
            .with_cache_ttl_secs(ttl_secs)
            .with_fetch_timeout_secs(1)
    }

    fn custom_entry() -> RegistryEntry {
        RegistryEntry {
            descriptor: FunctionDescriptor {
                id: "custom-url".to_string(),
                label: "Custom URL".to_string(),
                group: "Custom".to_string(),
            },
            source: SourceSpec::CustomUrl {
                location_key: Some("location.waterfront".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_hits_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"n": 1}"#))
            .expect(1)
            .mount(&server)
            .await;

        let mut pipeline = DataPipeline::new(&test_config(900)).unwrap();
        let url = format!("{}/feed", server.uri());

        let first = pipeline.fetch_parsed(&url, DataType::Json).await.unwrap();
        let second = pipeline.fetch_parsed(&url, DataType::Json).await.unwrap();

        assert_eq!(first, second);
        // MockServer verifies expect(1) on drop
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_one_new_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"n": 1}"#))
            .expect(2)
            .mount(&server)
            .await;

        let mut pipeline = DataPipeline::new(&test_config(0)).unwrap();
        let url = format!("{}/feed", server.uri());

        pipeline.fetch_parsed(&url, DataType::Json).await.unwrap();
        pipeline.fetch_parsed(&url, DataType::Json).await.unwrap();
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let mut pipeline = DataPipeline::new(&test_config(900)).unwrap();
        let url = format!("{}/feed", server.uri());

        assert!(pipeline.fetch_parsed(&url, DataType::Json).await.is_err());
        // The failure was not stored; this call fetches again
        assert!(pipeline.fetch_parsed(&url, DataType::Json).await.is_err());
    }

    #[tokio::test]
    async fn test_execute_custom_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "result": {
                    "records": [ { "type": "temperature", "value": 21.4, "time": 1000 } ]
                }
            })))
            .mount(&server)
            .await;

        let mut pipeline = DataPipeline::new(&test_config(900)).unwrap();
        let translator = Catalog::embedded();
        let slide_config = SlideConfig {
            data_function: Some("custom-url".to_string()),
            data_url: Some(format!("{}/records", server.uri())),
            data_type: DataType::Json,
        };

        let records = pipeline
            .execute(&custom_entry(), &slide_config, &translator)
            .await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Temperature");
        assert_eq!(records[0].location.as_deref(), Some("Aarhus waterfront"));
        assert_eq!(records[0].value, 21.0);
    }

    #[tokio::test]
    async fn test_execute_custom_without_url_is_empty() {
        let mut pipeline = DataPipeline::new(&test_config(900)).unwrap();
        let translator = Catalog::embedded();

        let records = pipeline
            .execute(&custom_entry(), &SlideConfig::default(), &translator)
            .await;

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_execute_telemetry_skips_failing_sensor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/measurement"))
            .and(query_param("sensor", "good"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sensor_rain_value": 0.4,
                "sensor_ts": 1700000000
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/measurement"))
            .and(query_param("sensor", "bad"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut pipeline = DataPipeline::new(&test_config(900)).unwrap();
        let translator = Catalog::embedded();
        let entry = RegistryEntry {
            descriptor: FunctionDescriptor {
                id: "harbor-weather".to_string(),
                label: "Harbor weather".to_string(),
                group: "Harbor".to_string(),
            },
            source: SourceSpec::Telemetry {
                base_url: format!("{}/measurement", server.uri()),
                sensors: vec!["bad".to_string(), "good".to_string()],
                fields: vec!["rain".to_string()],
            },
        };

        let records = pipeline
            .execute(&entry, &SlideConfig::default(), &translator)
            .await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Rain");
    }
}
