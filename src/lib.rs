//! bitbucket-source
//!
//! Resolves release downloads and repository metadata for packages hosted on
//! Bitbucket, for package managers that install straight from a repository
//! URL.

pub use bitbucket_source_core::{SourceError, SourceResult};

/// Core module re-exported from `bitbucket-source-core`.
pub mod core;

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// HTTP transport.
pub mod http;

/// Bitbucket URL matching, release and metadata resolution.
pub mod bitbucket;
