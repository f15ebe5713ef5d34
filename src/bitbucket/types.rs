//! Bitbucket API response shapes and the records handed back to the host

use crate::core::{SourceError, SourceResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// One page of a paginated Bitbucket collection
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub values: Vec<T>,
    /// Absolute URL of the following page; absent on the last one
    #[serde(default)]
    pub next: Option<String>,
}

/// A tag or branch from `/refs/tags` or `/refs/branches/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct RefEntry {
    pub name: String,
    pub target: RefTarget,
}

/// Commit a ref points at
#[derive(Debug, Clone, Deserialize)]
pub struct RefTarget {
    /// ISO-8601 commit date, e.g. `2021-05-06T12:00:00+00:00`
    pub date: String,
}

/// Repository document from `/2.0/repositories/{owner}/{repo}`
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryResponse {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub owner: RepositoryOwner,
    pub has_issues: bool,
    #[serde(default)]
    pub mainbranch: Option<MainBranch>,
}

impl RepositoryResponse {
    /// Name of the default branch, when the repository reports one
    pub fn main_branch_name(&self) -> Option<&str> {
        self.mainbranch.as_ref().and_then(|b| b.name.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl RepositoryOwner {
    /// Display handle, falling back to the account name
    pub fn author(&self) -> Option<String> {
        self.nickname.clone().or_else(|| self.username.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainBranch {
    #[serde(default)]
    pub name: Option<String>,
}

/// Entry of a source directory listing
#[derive(Debug, Clone, Deserialize)]
pub struct DirEntry {
    pub path: String,
}

/// Deserialize an API document, reporting shape mismatches against `url`
pub fn parse_response<T: DeserializeOwned>(url: &str, value: Value) -> SourceResult<T> {
    serde_json::from_value(value)
        .map_err(|e| SourceError::Client(format!("Invalid response from {}: {}", url, e)))
}

/// A downloadable release of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub version: String,
    /// Zip archive of the tag or branch
    pub url: String,
    /// Commit date, `YYYY-MM-DD hh:mm:ss`
    pub date: String,
}

/// Outcome of a release lookup on a recognised URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadInfo {
    /// The tags URL has no tag that parses as a version
    NoReleases,
    /// Releases, newest first
    Releases(Vec<ReleaseRecord>),
}

impl DownloadInfo {
    pub fn releases(&self) -> &[ReleaseRecord] {
        match self {
            DownloadInfo::NoReleases => &[],
            DownloadInfo::Releases(releases) => releases,
        }
    }
}

// Serialized the way host applications expect it: `false` or a list.
impl Serialize for DownloadInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DownloadInfo::NoReleases => serializer.serialize_bool(false),
            DownloadInfo::Releases(releases) => releases.serialize(serializer),
        }
    }
}

/// Descriptive metadata of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    pub description: String,
    pub homepage: String,
    pub author: Option<String>,
    /// Bitbucket has no donation links; always `None`
    pub donate: Option<String>,
    pub readme: Option<String>,
    pub issues: Option<String>,
}
