//! Core module re-exports.
//!
//! Errors, paths and version handling live in `bitbucket-source-core`.

pub use bitbucket_source_core::core::{error, path, version};
pub use bitbucket_source_core::{
    version_match_prefix, version_process, version_sort, SourceError, SourceResult, Version,
    VersionInfo,
};
