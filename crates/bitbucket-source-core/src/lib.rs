//! Core utilities shared by bitbucket-source: the error type, platform
//! paths and version parsing/sorting.

pub mod core;

pub use crate::core::error::{SourceError, SourceResult};
pub use crate::core::version::{version_match_prefix, version_process, version_sort, Version, VersionInfo};
