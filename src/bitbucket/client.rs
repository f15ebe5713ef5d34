//! Bitbucket release and metadata resolution

use crate::bitbucket::pages::PageWalker;
use crate::bitbucket::readme::find_readme;
use crate::bitbucket::types::{
    parse_response, DownloadInfo, RefEntry, ReleaseRecord, RepoMetadata, RepositoryResponse,
};
use crate::bitbucket::urls::{RepoIdentity, RepoUrl};
use crate::core::{version_process, version_sort, SourceError, SourceResult};
use crate::di::{JsonFetcher, RepositoryHost, SettingsProvider};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Branch assumed when the repository does not report a default one
const FALLBACK_BRANCH: &str = "master";

const NO_DESCRIPTION: &str = "No description provided";

/// Bitbucket backend
///
/// Performs no I/O of its own: every request goes through the injected
/// [`JsonFetcher`], one at a time.
pub struct BitBucketClient {
    fetcher: Arc<dyn JsonFetcher>,
    settings: Arc<dyn SettingsProvider>,
}

impl BitBucketClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, settings: Arc<dyn SettingsProvider>) -> Self {
        Self { fetcher, settings }
    }

    /// Retrieve information about downloading a package
    ///
    /// Accepted URLs:
    /// - `https://bitbucket.org/{owner}/{repo}` (default branch)
    /// - `https://bitbucket.org/{owner}/{repo}/src/{branch}`
    /// - `https://bitbucket.org/{owner}/{repo}#tags` (newest version tags)
    ///
    /// `tag_prefix` restricts a tags URL to tags starting with that prefix;
    /// without it only tags with no prefix other than `v` are considered.
    ///
    /// Returns `Ok(None)` for URLs that are not Bitbucket repositories.
    pub async fn download_info(
        &self,
        url: &str,
        tag_prefix: Option<&str>,
    ) -> SourceResult<Option<DownloadInfo>> {
        match RepoUrl::parse(url) {
            Some(RepoUrl::Tags(identity)) => {
                self.download_info_from_tags(&identity, tag_prefix).await.map(Some)
            }
            Some(RepoUrl::Branch { identity, branch }) => self
                .download_info_from_branch(&identity, branch.as_deref())
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    /// Releases from version tags, newest first
    pub async fn download_info_from_tags(
        &self,
        identity: &RepoIdentity,
        tag_prefix: Option<&str>,
    ) -> SourceResult<DownloadInfo> {
        let mut tag_names: Vec<String> = Vec::new();
        let mut tag_dates: HashMap<String, String> = HashMap::new();

        let mut walker =
            PageWalker::<RefEntry>::new(self.fetcher.as_ref(), identity.tags_api_url(), false);
        while let Some(tags) = walker.next_page().await? {
            for tag in tags {
                let date = commit_timestamp(&tag.target.date);
                if tag_dates.insert(tag.name.clone(), date).is_none() {
                    tag_names.push(tag.name);
                }
            }
        }
        debug!(repo = %identity, tags = tag_names.len(), "listed tags");

        let versions = version_sort(
            version_process(tag_names.iter().map(String::as_str), tag_prefix),
            true,
        );
        if versions.is_empty() {
            return Ok(DownloadInfo::NoReleases);
        }

        let max_releases = self.settings.max_releases();
        let mut used_versions = HashSet::new();
        let mut releases = Vec::new();

        for info in versions {
            if used_versions.contains(&info.version) {
                continue;
            }

            let tag = format!("{}{}", info.prefix, info.version);
            let date = tag_dates.get(&tag).cloned().ok_or_else(|| {
                SourceError::Client(format!("Tag {} missing from tag listing", tag))
            })?;

            releases.push(ReleaseRecord {
                url: identity.zip_url(&tag),
                version: info.version.clone(),
                date,
            });
            used_versions.insert(info.version);

            if max_releases > 0 && used_versions.len() >= max_releases {
                break;
            }
        }

        Ok(DownloadInfo::Releases(releases))
    }

    /// A single release from the head of `branch` (or the default branch)
    pub async fn download_info_from_branch(
        &self,
        identity: &RepoIdentity,
        branch: Option<&str>,
    ) -> SourceResult<DownloadInfo> {
        let branch = match branch {
            Some(branch) => branch.to_string(),
            None => {
                let repository = self.fetch_repository(identity, false).await?;
                default_branch(&repository)
            }
        };

        let branch_url = identity.branch_api_url(&branch);
        let value = self.fetcher.fetch_json(&branch_url, false).await?;
        let branch_info: RefEntry = parse_response(&branch_url, value)?;

        let timestamp = commit_timestamp(&branch_info.target.date);
        debug!(repo = %identity, branch = %branch, %timestamp, "resolved branch head");

        Ok(DownloadInfo::Releases(vec![ReleaseRecord {
            url: identity.zip_url(&branch),
            version: pseudo_version(&timestamp),
            date: timestamp,
        }]))
    }

    /// Retrieve general information about a repository
    ///
    /// Returns `Ok(None)` for URLs that are not Bitbucket repositories.
    pub async fn repo_info(&self, url: &str) -> SourceResult<Option<RepoMetadata>> {
        let Some(parsed) = RepoUrl::parse(url) else {
            return Ok(None);
        };
        let identity = parsed.identity();

        let repository = self.fetch_repository(identity, false).await?;
        let branch = match parsed.branch() {
            Some(branch) => branch.to_string(),
            None => default_branch(&repository),
        };

        let readme = self
            .readme_url(identity, &branch, self.settings.readme_prefer_cached())
            .await?;

        Ok(Some(RepoMetadata {
            name: repository.name.clone(),
            description: non_empty(repository.description.as_deref())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            homepage: non_empty(repository.website.as_deref())
                .unwrap_or(url)
                .to_string(),
            author: repository.owner.author(),
            donate: None,
            readme,
            issues: repository.has_issues.then(|| identity.issues_url()),
        }))
    }

    /// For API compatibility with other hosting backends; Bitbucket user
    /// URLs are never resolved.
    pub async fn user_info(&self, _url: &str) -> SourceResult<Option<Vec<RepoMetadata>>> {
        Ok(None)
    }

    /// Raw URL of the repository's readme on `branch`, if it has one
    pub async fn readme_url(
        &self,
        identity: &RepoIdentity,
        branch: &str,
        prefer_cached: bool,
    ) -> SourceResult<Option<String>> {
        find_readme(self.fetcher.as_ref(), identity, branch, prefer_cached).await
    }

    /// Name of the default branch, read from a cached repository document
    /// when one is available
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Client` if the repository does not report a
    /// main branch.
    pub async fn main_branch_name(&self, identity: &RepoIdentity) -> SourceResult<String> {
        let repository = self.fetch_repository(identity, true).await?;
        repository
            .main_branch_name()
            .map(str::to_string)
            .ok_or_else(|| {
                SourceError::Client(format!("Repository {} reports no main branch", identity))
            })
    }

    async fn fetch_repository(
        &self,
        identity: &RepoIdentity,
        prefer_cached: bool,
    ) -> SourceResult<RepositoryResponse> {
        let url = identity.repository_api_url();
        let value = self.fetcher.fetch_json(&url, prefer_cached).await?;
        parse_response(&url, value)
    }
}

#[async_trait]
impl RepositoryHost for BitBucketClient {
    async fn download_info(
        &self,
        url: &str,
        tag_prefix: Option<&str>,
    ) -> SourceResult<Option<DownloadInfo>> {
        Self::download_info(self, url, tag_prefix).await
    }

    async fn repo_info(&self, url: &str) -> SourceResult<Option<RepoMetadata>> {
        Self::repo_info(self, url).await
    }

    async fn user_info(&self, url: &str) -> SourceResult<Option<Vec<RepoMetadata>>> {
        Self::user_info(self, url).await
    }
}

fn default_branch(repository: &RepositoryResponse) -> String {
    let branch = repository.main_branch_name().unwrap_or(FALLBACK_BRANCH);
    debug!(repo = %repository.name, branch, "using default branch");
    branch.to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Commit date reduced to `YYYY-MM-DD hh:mm:ss`
pub fn commit_timestamp(date: &str) -> String {
    date.chars().take(19).collect::<String>().replace('T', " ")
}

/// Version string derived from a commit timestamp, e.g. `2021.05.06.12.00.00`
pub fn pseudo_version(timestamp: &str) -> String {
    timestamp.replace(|c| matches!(c, '-' | ':' | ' '), ".")
}
