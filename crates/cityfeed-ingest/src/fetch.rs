//! Bounded-timeout HTTP fetch
//!
//! One GET per invocation, no retries. The next scheduled batch run is the
//! retry mechanism, so a failed fetch only costs one cycle of staleness.

use cityfeed_common::{FeedError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP client wrapper issuing single bounded GETs
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher whose every request is bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("cityfeed-ingest/0.1")
            .build()
            .map_err(|e| FeedError::Fetch(e.to_string()))?;

        Ok(Fetcher { client })
    }

    /// Issue a single GET and return the raw body.
    ///
    /// Timeout, connection error, and non-success status all map to
    /// `FeedError::Fetch`; nothing unwinds out of the pipeline.
    pub async fn get(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching source");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Fetch(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(FeedError::Fetch(format!(
                "{}: HTTP status {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| FeedError::Fetch(format!("{}: {}", url, e)))
    }
}
