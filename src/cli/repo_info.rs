use super::{container, print_json};
use bitbucket_source::bitbucket::RepoUrl;
use bitbucket_source::core::SourceResult;
use std::path::Path;

pub async fn run(url: String, config_path: Option<&Path>) -> SourceResult<()> {
    if RepoUrl::parse(&url).is_none() {
        return print_json(&None::<()>);
    }

    let client = container(config_path)?.bitbucket();
    let metadata = client.repo_info(&url).await?;

    print_json(&metadata)
}
