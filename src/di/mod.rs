//! Dependency injection infrastructure
//!
//! The Bitbucket resolvers never perform I/O themselves. They receive a
//! [`JsonFetcher`] and a [`SettingsProvider`] so tests can swap in the
//! in-memory implementations from [`mocks`].
//!
//! # Example (Testing)
//! ```
//! use bitbucket_source::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let settings = Arc::new(MockSettingsProvider::default());
//! let fetcher = Arc::new(MockJsonFetcher::new());
//!
//! let container = ServiceContainer::with_providers(settings, fetcher);
//! let _client = container.bitbucket();
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{JsonFetcher, RepositoryHost, SettingsProvider};
