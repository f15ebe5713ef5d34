pub mod download_info;
pub mod repo_info;
pub mod urls;

use bitbucket_source::config::Config;
use bitbucket_source::core::SourceResult;
use bitbucket_source::di::ServiceContainer;
use serde::Serialize;
use std::path::Path;

/// Build the production services from the default or an explicit config file
pub fn container(config_path: Option<&Path>) -> SourceResult<ServiceContainer> {
    ServiceContainer::from_config(load_config(config_path)?)
}

pub fn load_config(config_path: Option<&Path>) -> SourceResult<Config> {
    match config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> SourceResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
