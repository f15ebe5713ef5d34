use super::print_json;
use bitbucket_source::bitbucket::{make_branch_url, make_tags_url};
use bitbucket_source::core::SourceResult;
use serde::Serialize;

#[derive(Serialize)]
struct DerivedUrls {
    tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
}

/// Print the web URLs derived from a bare repository URL
pub fn run(repo_url: String, branch: Option<String>) -> SourceResult<()> {
    let derived = make_tags_url(&repo_url).map(|tags| DerivedUrls {
        tags,
        branch: branch.and_then(|b| make_branch_url(&repo_url, &b)),
    });

    print_json(&derived)
}
