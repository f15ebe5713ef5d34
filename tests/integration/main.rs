//! Integration tests
//!
//! Exercise the public API end to end against the in-memory transport, and
//! the `bbsource` binary on its offline paths.

mod download_info;
mod repo_info;
