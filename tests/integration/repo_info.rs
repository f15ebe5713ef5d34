use crate::common::{client, client_with, listing_url, repository, REPO_API};
use bitbucket_source::bitbucket::RepoMetadata;
use bitbucket_source::di::mocks::{MockJsonFetcher, MockSettingsProvider};
use bitbucket_source::SourceError;
use serde_json::json;

const REPO_URL: &str = "https://bitbucket.org/owner/repo";

#[tokio::test]
async fn test_repo_info_full_record() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(REPO_API, repository(Some("main")));
    fetcher.add_json(
        listing_url("main"),
        json!({"values": [{"path": "LICENSE"}, {"path": "Readme.md"}]}),
    );

    let metadata = client(&fetcher).repo_info(REPO_URL).await.unwrap().unwrap();

    assert_eq!(
        metadata,
        RepoMetadata {
            name: "repo".to_string(),
            description: "A package".to_string(),
            homepage: "https://example.org/repo".to_string(),
            author: Some("owner-nick".to_string()),
            donate: None,
            readme: Some("https://bitbucket.org/owner/repo/raw/main/Readme.md".to_string()),
            issues: Some("https://bitbucket.org/owner/repo/issues".to_string()),
        }
    );
    assert_eq!(
        fetcher.requested_urls(),
        vec![REPO_API.to_string(), listing_url("main")]
    );
}

#[tokio::test]
async fn test_repo_info_fallbacks() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(
        REPO_API,
        json!({
            "name": "repo",
            "description": "",
            "website": "",
            "has_issues": false,
            "owner": {"username": "owner"}
        }),
    );
    fetcher.add_json(listing_url("master"), json!({"values": []}));

    let metadata = client(&fetcher).repo_info(REPO_URL).await.unwrap().unwrap();

    assert_eq!(metadata.description, "No description provided");
    assert_eq!(metadata.homepage, REPO_URL);
    assert_eq!(metadata.author.as_deref(), Some("owner"));
    assert_eq!(metadata.issues, None);
    assert_eq!(metadata.readme, None);
    assert_eq!(metadata.donate, None);
}

#[tokio::test]
async fn test_repo_info_uses_branch_from_url() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(REPO_API, repository(Some("main")));
    fetcher.add_json(listing_url("dev"), json!({"values": [{"path": "README"}]}));

    let url = "https://bitbucket.org/owner/repo/src/dev";
    let metadata = client(&fetcher).repo_info(url).await.unwrap().unwrap();

    assert_eq!(
        metadata.readme.as_deref(),
        Some("https://bitbucket.org/owner/repo/raw/dev/README")
    );
}

#[tokio::test]
async fn test_repo_info_missing_listing_means_no_readme() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(REPO_API, repository(Some("main")));
    fetcher.add_status(listing_url("main"), 404);

    let metadata = client(&fetcher).repo_info(REPO_URL).await.unwrap().unwrap();
    assert_eq!(metadata.readme, None);
}

#[tokio::test]
async fn test_repo_info_listing_failure_propagates() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(REPO_API, repository(Some("main")));
    fetcher.add_failure(listing_url("main"), "connection reset");

    let err = client(&fetcher).repo_info(REPO_URL).await.unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_repo_info_missing_repository_propagates() {
    let fetcher = MockJsonFetcher::new();

    let err = client(&fetcher).repo_info(REPO_URL).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_repo_info_malformed_repository() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(REPO_API, json!({"name": "repo"}));

    let err = client(&fetcher).repo_info(REPO_URL).await.unwrap_err();
    assert!(matches!(err, SourceError::Client(_)));
}

#[tokio::test]
async fn test_repo_info_forwards_prefer_cached_setting() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(REPO_API, repository(Some("main")));
    fetcher.add_json(listing_url("main"), json!({"values": []}));

    let settings = MockSettingsProvider {
        readme_prefer_cached: true,
        ..Default::default()
    };
    client_with(&fetcher, settings).repo_info(REPO_URL).await.unwrap();

    assert_eq!(
        fetcher.calls(),
        vec![(REPO_API.to_string(), false), (listing_url("main"), true)]
    );
}

#[tokio::test]
async fn test_repo_info_not_bitbucket() {
    let fetcher = MockJsonFetcher::new();
    assert_eq!(
        client(&fetcher).repo_info("https://github.com/owner/repo").await.unwrap(),
        None
    );
}
