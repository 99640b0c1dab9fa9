//! Ingest configuration

use serde::{Deserialize, Serialize};

/// Default response-cache TTL in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 900;

/// Default fetch timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 2;

/// Configuration for the ingest pipeline.
///
/// One cache TTL applies uniformly to every cached URL; one fetch timeout
/// bounds every outbound call. Source URLs are configurable so a host can
/// point the built-in functions at mirrors or test servers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Response-cache time-to-live in seconds
    pub cache_ttl_secs: u64,

    /// Per-request fetch timeout in seconds
    pub fetch_timeout_secs: u64,

    /// Slide type processed by the batch run
    pub slide_type: String,

    /// Path of the JSON slide store used by the binary
    pub slides_path: String,

    /// CKAN datastore-search URL for the Dokk1 climate functions
    pub ckan_datastore_url: String,

    /// Base URL of the fixed telemetry endpoint (`?sensor=<id>` is appended)
    pub telemetry_base_url: String,

    /// Hardcoded physical sensor identifiers queried one by one
    pub telemetry_sensors: Vec<String>,

    /// Solar production feed URL
    pub solar_url: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            slide_type: "city-data".to_string(),
            slides_path: "./slides.json".to_string(),
            ckan_datastore_url:
                "https://portal.opendata.dk/api/3/action/datastore_search?resource_id=e123e70c-9d13-461e-8715-f06ec41dd3cf"
                    .to_string(),
            telemetry_base_url: "https://sensordata.aarhus.dk/api/measurement".to_string(),
            telemetry_sensors: vec![
                "0004A30B001E8EA2".to_string(),
                "0004A30B001E307C".to_string(),
            ],
            solar_url: "https://portal.opendata.dk/api/3/action/datastore_search?resource_id=a2f54f51-secure-solar"
                .to_string(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// - `CITYFEED_CACHE_TTL_SECS`
    /// - `CITYFEED_FETCH_TIMEOUT_SECS`
    /// - `CITYFEED_SLIDE_TYPE`
    /// - `CITYFEED_SLIDES_PATH`
    /// - `CITYFEED_CKAN_URL`
    /// - `CITYFEED_TELEMETRY_URL`
    /// - `CITYFEED_TELEMETRY_SENSORS` (comma-separated)
    /// - `CITYFEED_SOLAR_URL`
    pub fn from_env() -> Self {
        let default = IngestConfig::default();

        IngestConfig {
            cache_ttl_secs: std::env::var("CITYFEED_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.cache_ttl_secs),
            fetch_timeout_secs: std::env::var("CITYFEED_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.fetch_timeout_secs),
            slide_type: std::env::var("CITYFEED_SLIDE_TYPE").unwrap_or(default.slide_type),
            slides_path: std::env::var("CITYFEED_SLIDES_PATH").unwrap_or(default.slides_path),
            ckan_datastore_url: std::env::var("CITYFEED_CKAN_URL")
                .unwrap_or(default.ckan_datastore_url),
            telemetry_base_url: std::env::var("CITYFEED_TELEMETRY_URL")
                .unwrap_or(default.telemetry_base_url),
            telemetry_sensors: std::env::var("CITYFEED_TELEMETRY_SENSORS")
                .map(|s| {
                    s.split(',')
                        .map(|id| id.trim().to_string())
                        .filter(|id| !id.is_empty())
                        .collect()
                })
                .unwrap_or(default.telemetry_sensors),
            solar_url: std::env::var("CITYFEED_SOLAR_URL").unwrap_or(default.solar_url),
        }
    }

    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }

    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    pub fn with_slide_type(mut self, slide_type: impl Into<String>) -> Self {
        self.slide_type = slide_type.into();
        self
    }

    pub fn with_ckan_datastore_url(mut self, url: impl Into<String>) -> Self {
        self.ckan_datastore_url = url.into();
        self
    }

    pub fn with_telemetry_base_url(mut self, url: impl Into<String>) -> Self {
        self.telemetry_base_url = url.into();
        self
    }

    pub fn with_telemetry_sensors(mut self, sensors: Vec<String>) -> Self {
        self.telemetry_sensors = sensors;
        self
    }

    pub fn with_solar_url(mut self, url: impl Into<String>) -> Self {
        self.solar_url = url.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_timeout_secs == 0 {
            return Err("Fetch timeout must be greater than 0".to_string());
        }

        if self.slide_type.is_empty() {
            return Err("Slide type cannot be empty".to_string());
        }

        if self.ckan_datastore_url.is_empty() {
            return Err("CKAN datastore URL cannot be empty".to_string());
        }

        if self.telemetry_base_url.is_empty() {
            return Err("Telemetry base URL cannot be empty".to_string());
        }

        if self.solar_url.is_empty() {
            return Err("Solar feed URL cannot be empty".to_string());
        }

        Ok(())
    }
}
