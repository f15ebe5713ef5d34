//! HTTP transport for the Bitbucket API
//!
//! Provides the production [`JsonFetcher`](crate::di::JsonFetcher), built on
//! reqwest with rustls.

pub mod client;

pub use client::HttpJsonClient;
