//! Trait definitions for dependency injection

use crate::bitbucket::types::{DownloadInfo, RepoMetadata};
use crate::core::SourceResult;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for settings access
///
/// Provides read-only access to the settings the resolvers consult.
/// Implementations should be thread-safe (Send + Sync).
pub trait SettingsProvider: Send + Sync {
    /// Maximum number of tag releases to report (0 = unlimited)
    fn max_releases(&self) -> usize;

    /// Whether readme lookups may reuse a cached directory listing
    fn readme_prefer_cached(&self) -> bool;
}

/// Trait for fetching JSON documents over HTTP
///
/// Retries, caching policy and authentication all belong to the
/// implementation; callers only choose whether a cached copy is acceptable.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Fetch and parse the JSON document at `url`
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Download` when the request fails (with the HTTP
    /// status when the server answered) and `SourceError::Json` when the body
    /// is not JSON.
    async fn fetch_json(&self, url: &str, prefer_cached: bool) -> SourceResult<Value>;
}

/// Trait for a repository hosting backend
///
/// The host application asks each backend in turn; a backend answers
/// `Ok(None)` for URLs that do not belong to it.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Resolve downloadable releases for a repository, branch or tags URL
    async fn download_info(
        &self,
        url: &str,
        tag_prefix: Option<&str>,
    ) -> SourceResult<Option<DownloadInfo>>;

    /// Resolve descriptive metadata for a repository or branch URL
    async fn repo_info(&self, url: &str) -> SourceResult<Option<RepoMetadata>>;

    /// Resolve metadata for every repository of a user URL
    async fn user_info(&self, url: &str) -> SourceResult<Option<Vec<RepoMetadata>>>;
}
