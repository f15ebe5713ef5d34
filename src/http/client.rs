//! reqwest-backed JSON transport

use crate::config::Config;
use crate::core::{SourceError, SourceResult};
use crate::di::JsonFetcher;
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// JSON-over-HTTP client used for all Bitbucket API calls
///
/// Successful responses are remembered for the lifetime of the client so
/// that callers passing `prefer_cached = true` can skip a round-trip.
pub struct HttpJsonClient {
    http_client: HttpClient,
    responses: Mutex<HashMap<String, Value>>,
}

impl HttpJsonClient {
    /// Create a new client from the configured user agent and timeout
    pub fn new(config: &Config) -> SourceResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| SourceError::Config(format!("Invalid user agent: {}", e)))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| SourceError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            responses: Mutex::new(HashMap::new()),
        })
    }

    /// Fetch and parse the JSON document at `url`
    pub async fn get_json(&self, url: &str, prefer_cached: bool) -> SourceResult<Value> {
        if prefer_cached {
            if let Some(value) = self.responses.lock().await.get(url) {
                trace!(url, "serving cached response");
                return Ok(value.clone());
            }
        }

        debug!(url, "GET");
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Download {
                url: url.to_string(),
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::http_status(
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body = response.bytes().await.map_err(|e| SourceError::Download {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: format!("Failed to read response body: {}", e),
        })?;
        let value: Value = serde_json::from_slice(&body)?;

        self.responses
            .lock()
            .await
            .insert(url.to_string(), value.clone());

        Ok(value)
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonClient {
    async fn fetch_json(&self, url: &str, prefer_cached: bool) -> SourceResult<Value> {
        self.get_json(url, prefer_cached).await
    }
}
