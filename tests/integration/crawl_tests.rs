//! Integration tests for version discovery
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl, harvest and ranking cycle end-to-end.

use getver::config::Config;
use getver::output::{postprocess, render, Outcome, Selection};
use getver::{find_version_candidates, GetverError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given depth and result count
fn create_test_config(depth: u32, max_results: usize) -> Config {
    let mut config = Config::default();
    config.crawler.depth = depth;
    config.crawler.timeout_ms = 2_000;
    config.crawler.max_concurrent_fetches = 4;
    config.output.max_results = max_results;
    config
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("Request recording is enabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_single_page_version() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "Version 3.2.1 released").await;

    let root = format!("{}/", mock_server.uri());
    let versions = find_version_candidates(&root, &create_test_config(1, 1))
        .await
        .expect("Crawl failed");

    assert_eq!(versions, vec!["3.2.1"]);
}

#[tokio::test]
async fn test_depth_one_stays_on_root() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><p>Latest release: 1.4</p><a href="/download">Download</a></body></html>"#,
    )
    .await;
    mount_page(&mock_server, "/download", "<p>Get version 2.0.1 now</p>").await;

    let root = format!("{}/", mock_server.uri());
    let versions = find_version_candidates(&root, &create_test_config(1, 5))
        .await
        .expect("Crawl failed");

    assert_eq!(versions, vec!["1.4"]);
    assert_eq!(requested_paths(&mock_server).await, vec!["/"]);
}

#[tokio::test]
async fn test_depth_two_follows_sub_pages() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><p>Latest release: 1.4</p>
        <a href="/download">Download</a>
        <a href="/logo.png">Logo</a>
        <a href="http://elsewhere.example.org/page">Elsewhere</a>
        </body></html>"#,
    )
    .await;
    mount_page(&mock_server, "/download", "<p>Get version 2.0.1 now</p>").await;

    let root = format!("{}/", mock_server.uri());
    let versions = find_version_candidates(&root, &create_test_config(2, 5))
        .await
        .expect("Crawl failed");

    assert_eq!(versions, vec!["2.0.1", "1.4"]);

    let mut paths = requested_paths(&mock_server).await;
    paths.sort();
    assert_eq!(paths, vec!["/", "/download"]);
}

#[tokio::test]
async fn test_pages_reached_twice_are_fetched_once() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a> <a href="/b">B</a> 1.0"#,
    )
    .await;
    mount_page(&mock_server, "/a", r#"<a href="/b">B</a> 1.1"#).await;
    mount_page(&mock_server, "/b", r#"<a href="/a">A</a> 1.2"#).await;

    let root = format!("{}/", mock_server.uri());
    let versions = find_version_candidates(&root, &create_test_config(3, 10))
        .await
        .expect("Crawl failed");

    assert_eq!(versions.len(), 3);

    let mut paths = requested_paths(&mock_server).await;
    paths.sort();
    assert_eq!(paths, vec!["/", "/a", "/b"]);
}

#[tokio::test]
async fn test_result_truncation() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "Releases: 1.0 2.0 3.0 4.0 and the new 5.0.1",
    )
    .await;

    let root = format!("{}/", mock_server.uri());
    let versions = find_version_candidates(&root, &create_test_config(1, 1))
        .await
        .expect("Crawl failed");

    assert_eq!(versions, vec!["5.0.1"]);
}

#[tokio::test]
async fn test_no_candidates() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<p>Nothing to see here</p>").await;

    let root = format!("{}/", mock_server.uri());
    let versions = find_version_candidates(&root, &create_test_config(1, 3))
        .await
        .expect("Crawl failed");
    assert!(versions.is_empty());

    let outcome = render(&versions, Selection::Numbered).unwrap();
    assert_eq!(outcome, Outcome::NoResults { numbered: true });
    assert_eq!(outcome.exit_code(), 2);
}

#[tokio::test]
async fn test_unreachable_site_yields_no_results() {
    let versions = find_version_candidates("http://127.0.0.1:1/", &create_test_config(2, 3))
        .await
        .expect("Crawl should complete even when the fetch fails");
    assert!(versions.is_empty());
}

#[tokio::test]
async fn test_repeated_runs_do_not_share_state() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "Current: 1.2.3, previous: 1.2.2").await;

    let root = format!("{}/", mock_server.uri());
    let config = create_test_config(1, 2);
    let first = find_version_candidates(&root, &config).await.unwrap();
    let second = find_version_candidates(&root, &config).await.unwrap();

    assert_eq!(first, vec!["1.2.3", "1.2.2"]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_sorted_selection() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "Current: 1.2.3, previous: 1.2.10").await;

    let root = format!("{}/", mock_server.uri());
    let selection = Selection::Single(1);
    let config = create_test_config(1, selection.results_to_retrieve(1));

    let versions = find_version_candidates(&root, &config).await.unwrap();
    let versions = postprocess(versions, true);

    assert_eq!(
        render(&versions, selection).unwrap(),
        Outcome::Found("1.2.3\n".to_string())
    );
    assert!(matches!(
        render(&versions, Selection::Single(3)),
        Err(GetverError::NotEnoughResults { requested: 3, .. })
    ));
}

#[tokio::test]
async fn test_invalid_root_url() {
    let result = find_version_candidates("ftp://example.com/", &create_test_config(1, 1)).await;
    assert!(matches!(result, Err(GetverError::UrlError(_))));
}
