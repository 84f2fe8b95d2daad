//! HTTP source polling a JSON wait time endpoint.
//!
//! The endpoint is expected to return a flat JSON object mapping hospital
//! names to wait time strings (or `null`):
//!
//! ```json
//! {"General Hospital": "2 hr 12 min", "St. Mary's": null}
//! ```
//!
//! No authentication, pagination or retries. Each fetch is one GET bounded
//! by the configured timeout.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use waitwatch_types::Snapshot;

use super::{FetchError, SnapshotSource};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source that fetches snapshots from a JSON endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: String,
    timeout: Duration,
    description: String,
}

impl HttpSource {
    /// Create a new builder for configuring the source.
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::default()
    }

    /// The endpoint being polled.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl SnapshotSource for HttpSource {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;

        debug!(status = %response.status(), endpoint = %self.endpoint, "endpoint responded");

        if !response.status().is_success() {
            return Err(FetchError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        // Body-read timeouts and dropped connections surface here too.
        let snapshot: Snapshot = response.json().await?;

        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for HttpSource.
#[derive(Debug)]
pub struct HttpSourceBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    system_proxy: bool,
}

impl Default for HttpSourceBuilder {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout: None,
            system_proxy: true,
        }
    }
}

impl HttpSourceBuilder {
    /// Set the endpoint URL (e.g., "https://howlongwilliwait.com/sample.json").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether to honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment (default: true).
    pub fn system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    /// Build the source.
    pub fn build(self) -> Result<HttpSource, FetchError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let mut client = Client::builder().timeout(timeout);
        if !self.system_proxy {
            client = client.no_proxy();
        }
        let client = client
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| crate::settings::DEFAULT_URL.to_string());
        let description = format!("http: {}", endpoint);

        Ok(HttpSource {
            client,
            endpoint,
            timeout,
            description,
        })
    }
}
