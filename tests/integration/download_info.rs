use crate::common::{client, client_with, repository, tag, REPO_API, TAGS_API};
use bitbucket_source::bitbucket::{DownloadInfo, ReleaseRecord};
use bitbucket_source::di::mocks::{MockJsonFetcher, MockSettingsProvider};
use bitbucket_source::di::RepositoryHost;
use bitbucket_source::SourceError;
use serde_json::json;

const TAGS_URL: &str = "https://bitbucket.org/owner/repo#tags";

fn versions(info: &DownloadInfo) -> Vec<&str> {
    info.releases().iter().map(|r| r.version.as_str()).collect()
}

#[tokio::test]
async fn test_other_hosts_are_not_matched() {
    let fetcher = MockJsonFetcher::new();
    let client = client(&fetcher);

    for url in [
        "https://github.com/owner/repo",
        "https://gitlab.com/owner/repo/-/tags",
        "https://bitbucket.org/owner",
        "https://bitbucket.org/owner/repo/downloads",
    ] {
        assert_eq!(client.download_info(url, None).await.unwrap(), None, "{}", url);
    }
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_tags_are_ordered_newest_first() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(
        TAGS_API,
        json!({"values": [
            tag("v1.0", "2020-01-01T10:00:00+00:00"),
            tag("v2.0", "2021-01-01T10:00:00+00:00"),
            tag("1.5", "2020-06-01T10:00:00+00:00"),
        ]}),
    );

    let info = client(&fetcher).download_info(TAGS_URL, None).await.unwrap().unwrap();

    assert_eq!(
        info,
        DownloadInfo::Releases(vec![
            ReleaseRecord {
                version: "2.0".to_string(),
                url: "https://bitbucket.org/owner/repo/get/v2.0.zip".to_string(),
                date: "2021-01-01 10:00:00".to_string(),
            },
            ReleaseRecord {
                version: "1.5".to_string(),
                url: "https://bitbucket.org/owner/repo/get/1.5.zip".to_string(),
                date: "2020-06-01 10:00:00".to_string(),
            },
            ReleaseRecord {
                version: "1.0".to_string(),
                url: "https://bitbucket.org/owner/repo/get/v1.0.zip".to_string(),
                date: "2020-01-01 10:00:00".to_string(),
            },
        ])
    );
}

#[tokio::test]
async fn test_duplicate_versions_keep_first_in_order() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(
        TAGS_API,
        json!({"values": [
            tag("2.0", "2021-01-02T00:00:00+00:00"),
            tag("v2.0", "2021-01-01T00:00:00+00:00"),
        ]}),
    );

    let info = client(&fetcher).download_info(TAGS_URL, None).await.unwrap().unwrap();

    assert_eq!(versions(&info), vec!["2.0"]);
    assert_eq!(info.releases()[0].url, "https://bitbucket.org/owner/repo/get/2.0.zip");
}

#[tokio::test]
async fn test_tag_pages_are_merged() {
    let fetcher = MockJsonFetcher::new();
    let page2 = format!("{}&page=2", TAGS_API);
    fetcher.add_json(
        TAGS_API,
        json!({"values": [tag("1.0.0", "2020-01-01T00:00:00+00:00")], "next": page2}),
    );
    fetcher.add_json(
        &page2,
        json!({"values": [tag("3.0.0", "2022-01-01T00:00:00+00:00")]}),
    );

    let info = client(&fetcher).download_info(TAGS_URL, None).await.unwrap().unwrap();

    assert_eq!(versions(&info), vec!["3.0.0", "1.0.0"]);
    assert_eq!(fetcher.requested_urls(), vec![TAGS_API.to_string(), page2]);
}

#[tokio::test]
async fn test_repeated_tag_takes_date_from_later_page() {
    let fetcher = MockJsonFetcher::new();
    let page2 = format!("{}&page=2", TAGS_API);
    fetcher.add_json(
        TAGS_API,
        json!({"values": [tag("1.0.0", "2020-01-01T00:00:00+00:00")], "next": page2}),
    );
    fetcher.add_json(
        &page2,
        json!({"values": [tag("1.0.0", "2020-03-04T05:06:07+00:00")]}),
    );

    let info = client(&fetcher).download_info(TAGS_URL, None).await.unwrap().unwrap();

    assert_eq!(
        info.releases(),
        &[ReleaseRecord {
            version: "1.0.0".to_string(),
            url: "https://bitbucket.org/owner/repo/get/1.0.0.zip".to_string(),
            date: "2020-03-04 05:06:07".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_max_releases_caps_output() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(
        TAGS_API,
        json!({"values": [
            tag("1.0.0", "2020-01-01T00:00:00+00:00"),
            tag("1.1.0", "2020-02-01T00:00:00+00:00"),
            tag("1.2.0", "2020-03-01T00:00:00+00:00"),
        ]}),
    );

    let info = client_with(&fetcher, MockSettingsProvider::with_max_releases(1))
        .download_info(TAGS_URL, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(versions(&info), vec!["1.2.0"]);
}

#[tokio::test]
async fn test_no_tags_means_no_releases() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(TAGS_API, json!({"values": []}));

    let info = client(&fetcher).download_info(TAGS_URL, None).await.unwrap();
    assert_eq!(info, Some(DownloadInfo::NoReleases));
    assert_eq!(serde_json::to_string(&info).unwrap(), "false");
}

#[tokio::test]
async fn test_no_version_tags_means_no_releases() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(
        TAGS_API,
        json!({"values": [
            tag("latest", "2020-01-01T00:00:00+00:00"),
            tag("release-candidate", "2020-01-02T00:00:00+00:00"),
        ]}),
    );

    let info = client(&fetcher).download_info(TAGS_URL, None).await.unwrap();
    assert_eq!(info, Some(DownloadInfo::NoReleases));
}

#[tokio::test]
async fn test_prefix_without_matching_tags_means_no_releases() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(
        TAGS_API,
        json!({"values": [tag("1.0.0", "2020-01-01T00:00:00+00:00")]}),
    );

    let info = client(&fetcher)
        .download_info(TAGS_URL, Some("st4-"))
        .await
        .unwrap();
    assert_eq!(info, Some(DownloadInfo::NoReleases));
}

#[tokio::test]
async fn test_tag_listing_failure_propagates() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_status(TAGS_API, 500);

    let err = client(&fetcher).download_info(TAGS_URL, None).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_default_branch_is_resolved_first() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(REPO_API, repository(Some("main")));
    fetcher.add_json(
        format!("{}/refs/branches/main", REPO_API),
        tag("main", "2021-05-06T12:00:00+00:00"),
    );

    let info = client(&fetcher)
        .download_info("https://bitbucket.org/owner/repo/", None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        info.releases(),
        &[ReleaseRecord {
            version: "2021.05.06.12.00.00".to_string(),
            url: "https://bitbucket.org/owner/repo/get/main.zip".to_string(),
            date: "2021-05-06 12:00:00".to_string(),
        }]
    );
    assert_eq!(
        fetcher.requested_urls(),
        vec![REPO_API.to_string(), format!("{}/refs/branches/main", REPO_API)]
    );
}

#[tokio::test]
async fn test_missing_branch_is_an_error() {
    let fetcher = MockJsonFetcher::new();

    let err = client(&fetcher)
        .download_info("https://bitbucket.org/owner/repo/src/gone", None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, SourceError::Download { .. }));
}

#[tokio::test]
async fn test_works_through_the_host_trait() {
    let fetcher = MockJsonFetcher::new();
    fetcher.add_json(
        TAGS_API,
        json!({"values": [tag("0.1.0", "2020-01-01T00:00:00+00:00")]}),
    );

    let host: Box<dyn RepositoryHost> = Box::new(client(&fetcher));
    let info = host.download_info(TAGS_URL, None).await.unwrap().unwrap();
    assert_eq!(versions(&info), vec!["0.1.0"]);
    assert!(host.user_info("https://bitbucket.org/owner").await.unwrap().is_none());
}
