//! Service container for dependency injection

use super::traits::{JsonFetcher, SettingsProvider};
use crate::bitbucket::BitBucketClient;
use crate::config::Config;
use crate::core::SourceResult;
use crate::http::HttpJsonClient;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the settings and the transport behind trait objects so the
/// production HTTP client can be replaced by mocks in tests.
///
/// # Example (Testing)
///
/// ```
/// use bitbucket_source::di::{ServiceContainer, SettingsProvider, mocks::*};
/// use std::sync::Arc;
///
/// let settings = Arc::new(MockSettingsProvider::with_max_releases(1));
/// let fetcher = Arc::new(MockJsonFetcher::new());
///
/// let container = ServiceContainer::with_providers(settings, fetcher);
/// assert_eq!(container.settings().max_releases(), 1);
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub settings: Arc<dyn SettingsProvider>,
    pub fetcher: Arc<dyn JsonFetcher>,
}

impl ServiceContainer {
    /// Create a container with production implementations for a given config
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: Config) -> SourceResult<Self> {
        let fetcher = HttpJsonClient::new(&config)?;
        Ok(Self {
            settings: Arc::new(config),
            fetcher: Arc::new(fetcher),
        })
    }

    /// Create a service container with custom provider implementations
    ///
    /// This is primarily useful for testing, where you can inject mock
    /// implementations of each service.
    pub fn with_providers(
        settings: Arc<dyn SettingsProvider>,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Self {
        Self { settings, fetcher }
    }

    /// Get the settings provider
    pub fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    /// Build a Bitbucket client wired to this container's services
    pub fn bitbucket(&self) -> BitBucketClient {
        BitBucketClient::new(Arc::clone(&self.fetcher), Arc::clone(&self.settings))
    }
}
