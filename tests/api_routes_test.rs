use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use m3u_catalog::{
    models::{CacheState, CatalogStatus, ChannelRecord},
    services::{CatalogCache, ChannelService},
    sources::HttpPlaylistFetcher,
    web::{AppState, router},
};

const PLAYLIST: &str = r#"#EXTM3U x-tvg-url="http://epg.example.com/guide.xml"
#EXTINF:-1 tvg-id="CNN.us" tvg-logo="http://x/l.png" group-title="News",CNN
http://stream/cnn
#EXTINF:-1 tvg-id="ESPN.us" group-title="Sports",ESPN
http://stream/espn
#EXTINF:-1 group-title="News;Sports",Newsport
http://stream/newsport
#EXTINF:-1,No Group
http://stream/nogroup
"#;

async fn playlist_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.m3u"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn test_app(upstream: &MockServer) -> TestServer {
    let fetcher = HttpPlaylistFetcher::new(
        format!("{}/index.m3u", upstream.uri()),
        Duration::from_secs(5),
        Duration::from_secs(5),
        "m3u-catalog-test",
    )
    .unwrap();
    let cache = CatalogCache::new(
        Arc::new(fetcher),
        Duration::from_secs(3600),
        Duration::from_secs(5),
    );
    let state = AppState::new(ChannelService::new(Arc::new(cache)));
    TestServer::new(router(state)).unwrap()
}

#[tokio::test]
async fn test_list_all_channels() {
    let upstream = playlist_server(200, PLAYLIST).await;
    let server = test_app(&upstream);

    let response = server.get("/api/channels").await;
    response.assert_status_ok();

    let channels: Vec<ChannelRecord> = response.json();
    let names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["CNN", "ESPN", "Newsport", "No Group"]);

    assert_eq!(
        channels[0],
        ChannelRecord {
            name: "CNN".to_string(),
            logo: "http://x/l.png".to_string(),
            group: "News".to_string(),
            id: "CNN.us".to_string(),
            url: "http://stream/cnn".to_string(),
        }
    );
    assert_eq!(channels[3].group, "General");
}

#[tokio::test]
async fn test_channel_json_shape() {
    let upstream = playlist_server(200, PLAYLIST).await;
    let server = test_app(&upstream);

    let body: Value = server.get("/api/channels").await.json();
    let first = body.as_array().unwrap()[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["group", "id", "logo", "name", "url"]);
}

#[tokio::test]
async fn test_filter_by_category_and_search() {
    let upstream = playlist_server(200, PLAYLIST).await;
    let server = test_app(&upstream);

    let news: Vec<ChannelRecord> = server
        .get("/api/channels")
        .add_query_param("category", "News")
        .await
        .json();
    assert_eq!(news.len(), 1);
    assert_eq!(news[0].name, "CNN");

    let search: Vec<ChannelRecord> = server
        .get("/api/channels")
        .add_query_param("search", "SPORT")
        .await
        .json();
    let names: Vec<&str> = search.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ESPN", "Newsport"]);

    let none: Vec<ChannelRecord> = server
        .get("/api/channels")
        .add_query_param("category", "Movies")
        .add_query_param("search", "cnn")
        .await
        .json();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_empty_query_parameters_are_ignored() {
    let upstream = playlist_server(200, PLAYLIST).await;
    let server = test_app(&upstream);

    let channels: Vec<ChannelRecord> = server
        .get("/api/channels")
        .add_query_param("category", "")
        .add_query_param("search", "")
        .await
        .json();
    assert_eq!(channels.len(), 4);
}

#[tokio::test]
async fn test_list_categories() {
    let upstream = playlist_server(200, PLAYLIST).await;
    let server = test_app(&upstream);

    let response = server.get("/api/categories").await;
    response.assert_status_ok();
    let categories: Vec<String> = response.json();
    assert_eq!(categories, vec!["General", "News", "Sports"]);
}

#[tokio::test]
async fn test_upstream_failure_serves_empty_arrays() {
    let upstream = playlist_server(500, "oops").await;
    let server = test_app(&upstream);

    let channels = server.get("/api/channels").await;
    channels.assert_status(StatusCode::OK);
    assert_eq!(channels.json::<Vec<ChannelRecord>>(), Vec::new());

    let categories = server.get("/api/categories").await;
    categories.assert_status(StatusCode::OK);
    assert!(categories.json::<Vec<String>>().is_empty());

    let status: CatalogStatus = server.get("/api/status").await.json();
    assert_eq!(status.state, CacheState::Empty);
    assert_eq!(
        status.last_error.as_deref(),
        Some("HTTP error: 500 - Internal Server Error")
    );
}

#[tokio::test]
async fn test_playlist_fetched_once_across_requests() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.m3u"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PLAYLIST))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = test_app(&upstream);

    server.get("/api/channels").await.assert_status_ok();
    server.get("/api/categories").await.assert_status_ok();
    server
        .get("/api/channels")
        .add_query_param("search", "cnn")
        .await
        .assert_status_ok();

    let status: CatalogStatus = server.get("/api/status").await.json();
    assert_eq!(status.state, CacheState::Fresh);
    assert_eq!(status.channel_count, 4);

    upstream.verify().await;
}

#[tokio::test]
async fn test_status_does_not_fetch() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PLAYLIST))
        .expect(0)
        .mount(&upstream)
        .await;
    let server = test_app(&upstream);

    let status: CatalogStatus = server.get("/api/status").await.json();
    assert_eq!(status.state, CacheState::Empty);
    assert_eq!(status.ttl_seconds, 3600);

    upstream.verify().await;
}

#[tokio::test]
async fn test_health_endpoint() {
    let upstream = MockServer::start().await;
    let server = test_app(&upstream);

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cors_headers_present() {
    let upstream = playlist_server(200, PLAYLIST).await;
    let server = test_app(&upstream);

    let response = server
        .get("/api/categories")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://frontend.example.com"),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}
