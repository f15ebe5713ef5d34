//! Mock implementations of service traits for testing

use super::traits::{JsonFetcher, SettingsProvider};
use crate::core::{SourceError, SourceResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock settings provider for testing
///
/// # Example
///
/// ```
/// use bitbucket_source::di::mocks::MockSettingsProvider;
/// use bitbucket_source::di::SettingsProvider;
///
/// let settings = MockSettingsProvider::with_max_releases(3);
/// assert_eq!(settings.max_releases(), 3);
/// assert!(!settings.readme_prefer_cached());
/// ```
#[derive(Clone, Default)]
pub struct MockSettingsProvider {
    pub max_releases: usize,
    pub readme_prefer_cached: bool,
}

impl MockSettingsProvider {
    pub fn with_max_releases(max_releases: usize) -> Self {
        Self {
            max_releases,
            ..Default::default()
        }
    }
}

impl SettingsProvider for MockSettingsProvider {
    fn max_releases(&self) -> usize {
        self.max_releases
    }

    fn readme_prefer_cached(&self) -> bool {
        self.readme_prefer_cached
    }
}

#[derive(Clone)]
enum MockResponse {
    Json(Value),
    Failure { status: Option<u16>, message: String },
}

/// Mock JSON transport for testing
///
/// Serves pre-registered documents by exact URL and records every request.
/// URLs without a registered response fail like a server answering 404.
///
/// # Example
///
/// ```
/// use bitbucket_source::di::mocks::MockJsonFetcher;
/// use bitbucket_source::di::JsonFetcher;
/// use serde_json::json;
///
/// # tokio_test_block(async {
/// let fetcher = MockJsonFetcher::new();
/// fetcher.add_json("https://api.example.org/a", json!({"ok": true}));
///
/// let value = fetcher.fetch_json("https://api.example.org/a", false).await.unwrap();
/// assert_eq!(value["ok"], true);
/// assert!(fetcher.fetch_json("https://api.example.org/b", false).await.is_err());
/// assert_eq!(fetcher.requested_urls().len(), 2);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f);
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MockJsonFetcher {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl MockJsonFetcher {
    /// Create a new mock transport with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `value` for `url`
    pub fn add_json(&self, url: impl Into<String>, value: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.into(), MockResponse::Json(value));
    }

    /// Fail requests for `url` with an HTTP status
    pub fn add_status(&self, url: impl Into<String>, status: u16) {
        self.responses.lock().unwrap().insert(
            url.into(),
            MockResponse::Failure {
                status: Some(status),
                message: String::new(),
            },
        );
    }

    /// Fail requests for `url` with a transport error that carries no status
    pub fn add_failure(&self, url: impl Into<String>, message: impl Into<String>) {
        self.responses.lock().unwrap().insert(
            url.into(),
            MockResponse::Failure {
                status: None,
                message: message.into(),
            },
        );
    }

    /// Every request made so far, with its `prefer_cached` flag
    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }

    /// Every URL requested so far, in order
    pub fn requested_urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|(url, _)| url).collect()
    }
}

#[async_trait]
impl JsonFetcher for MockJsonFetcher {
    async fn fetch_json(&self, url: &str, prefer_cached: bool) -> SourceResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), prefer_cached));

        let response = self.responses.lock().unwrap().get(url).cloned();
        match response {
            Some(MockResponse::Json(value)) => Ok(value),
            Some(MockResponse::Failure { status, message }) => Err(SourceError::Download {
                url: url.to_string(),
                status,
                message,
            }),
            None => Err(SourceError::http_status(url, 404, "Not Found")),
        }
    }
}
