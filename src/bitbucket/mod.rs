//! Bitbucket hosting backend
//!
//! This module resolves, from a public Bitbucket URL alone:
//! - downloadable releases, either from version tags or from a branch head
//! - repository metadata (description, homepage, author, readme, issues)
//!
//! All requests go through an injected [`JsonFetcher`](crate::di::JsonFetcher);
//! URLs of other hosting services resolve to `Ok(None)`.

pub mod client;
pub mod pages;
pub mod readme;
pub mod types;
pub mod urls;

pub use client::BitBucketClient;
pub use types::{DownloadInfo, ReleaseRecord, RepoMetadata};
pub use urls::{make_branch_url, make_repo_url, make_tags_url, RepoIdentity, RepoUrl};
