use super::{load_config, print_json};
use bitbucket_source::bitbucket::RepoUrl;
use bitbucket_source::core::SourceResult;
use bitbucket_source::di::ServiceContainer;
use std::path::Path;

pub struct DownloadInfoOptions {
    pub url: String,
    pub tag_prefix: Option<String>,
    pub max_releases: Option<usize>,
}

pub async fn run(options: DownloadInfoOptions, config_path: Option<&Path>) -> SourceResult<()> {
    // Other hosts need no config and no network.
    if RepoUrl::parse(&options.url).is_none() {
        return print_json(&None::<()>);
    }

    let mut config = load_config(config_path)?;
    if let Some(max_releases) = options.max_releases {
        config.max_releases = max_releases;
    }

    let client = ServiceContainer::from_config(config)?.bitbucket();
    let info = client
        .download_info(&options.url, options.tag_prefix.as_deref())
        .await?;

    print_json(&info)
}
