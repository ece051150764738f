use std::time::Duration;

use a2g_core::config::LaunchApiConfig;
use a2g_core::{ErrorKind, LaunchAdapter, LaunchFilter};
use httpmock::prelude::*;
use serde_json::{json, Value};

fn launch(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": {"id": 1, "name": "Go for Launch", "abbrev": "Go"},
        "net": "2026-10-21T14:00:00Z",
        "window_start": "2026-10-21T14:00:00Z",
        "window_end": "2026-10-21T16:00:00Z",
        "probability": 80,
        "holdreason": null,
        "failreason": null,
        "launch_service_provider": {"id": 121, "name": "SpaceX", "type": "Commercial"},
        "rocket": {"id": 7, "configuration": {"id": 164, "name": "Falcon 9"}},
        "mission": {"id": 9, "name": "Starlink Group 12-3", "type": "Communications"},
        "pad": {"id": 80, "name": "SLC-40", "location": {"name": "Cape Canaveral"}},
        "image": "https://cdn.example.test/f9.png",
        "program": [],
        "updates": []
    })
}

fn page(count: u64, results: Vec<Value>) -> Value {
    json!({
        "count": count,
        "next": "https://ll.example.test/2.2.0/launch/?limit=10&offset=10",
        "previous": null,
        "results": results,
    })
}

fn adapter_for(server: &MockServer, listing_ttl: Duration, upcoming_ttl: Duration) -> LaunchAdapter {
    let mut cfg = LaunchApiConfig::new(server.base_url().parse().expect("mock base url"));
    cfg.listing_ttl = listing_ttl;
    cfg.upcoming_ttl = upcoming_ttl;
    LaunchAdapter::new(&cfg, reqwest::Client::new())
}

#[tokio::test]
async fn identical_requests_within_ttl_hit_upstream_once() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/launch/")
                .query_param("limit", "10")
                .query_param("offset", "0");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page(42, vec![launch("a", "Starlink 12-3")]));
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_secs(60), Duration::from_secs(30));

    let first = adapter
        .list_launches(&LaunchFilter::default())
        .await
        .expect("first page");
    let second = adapter
        .list_launches(&LaunchFilter::default())
        .await
        .expect("cached page");

    assert_eq!(first, second);
    assert_eq!(first.count, 42);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn expired_entries_are_refetched() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/launch/");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page(1, vec![launch("a", "Starlink 12-3")]));
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_millis(250), Duration::from_secs(30));

    adapter.list_launches(&LaunchFilter::default()).await.unwrap();
    adapter.list_launches(&LaunchFilter::default()).await.unwrap();
    mock.assert_hits_async(1).await;

    tokio::time::sleep(Duration::from_millis(600)).await;
    adapter.list_launches(&LaunchFilter::default()).await.unwrap();
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn distinct_query_strings_are_cached_separately() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/launch/");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page(30, vec![]));
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_secs(60), Duration::from_secs(30));

    let second_page = LaunchFilter {
        offset: 10,
        ..LaunchFilter::default()
    };
    adapter.list_launches(&LaunchFilter::default()).await.unwrap();
    adapter.list_launches(&second_page).await.unwrap();
    adapter.list_launches(&second_page).await.unwrap();
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn page_never_exceeds_limit_and_count_is_untouched() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/launch/").query_param("limit", "2");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page(
                    57,
                    vec![launch("a", "A"), launch("b", "B"), launch("c", "C")],
                ));
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_secs(60), Duration::from_secs(30));

    let filter = LaunchFilter {
        limit: 2,
        ..LaunchFilter::default()
    };
    let page = adapter.list_launches(&filter).await.unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.count, 57);
    assert_eq!(page.results[0].id(), Some("a"));
}

#[tokio::test]
async fn records_are_relayed_as_received() {
    let upstream = json!({
        "count": 3,
        "next": null,
        "previous": null,
        "results": [
            {"id": "f9-1", "name": "Falcon 9 | Starlink 12-3", "net": "2026-10-21T14:00:00Z"},
            {"id": "el-7", "name": "Electron | Rocket Lab", "status": null, "slug": "el-7"},
            {"id": "ss-12", "name": "Starship | Flight 12"}
        ]
    });
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/launch/").query_param("limit", "2");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(upstream.clone());
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_secs(60), Duration::from_secs(30));

    let page = adapter
        .list_launches(&LaunchFilter {
            limit: 2,
            ..LaunchFilter::default()
        })
        .await
        .expect("status-less records decode");

    let mut expected = upstream.clone();
    expected["results"].as_array_mut().unwrap().truncate(2);
    assert_eq!(serde_json::to_value(&page).unwrap(), expected);
    assert_eq!(page.results[0].status(), None);
}

#[tokio::test]
async fn status_and_search_reach_the_provider() {
    let server = MockServer::start_async().await;
    let starship = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/launch/")
                .query_param("status", "upcoming")
                .query_param("search", "Starship");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page(1, vec![launch("s", "Starship | Flight 12")]));
        })
        .await;
    let soyuz = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/launch/")
                .query_param("search", "Союз МС-28");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page(0, vec![]));
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_secs(60), Duration::from_secs(30));

    let page = adapter
        .list_launches(&LaunchFilter {
            status: Some("upcoming".into()),
            search: Some("Starship".into()),
            ..LaunchFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(page.results[0].name(), Some("Starship | Flight 12"));
    starship.assert_hits_async(1).await;

    adapter
        .list_launches(&LaunchFilter {
            search: Some("Союз МС-28".into()),
            ..LaunchFilter::default()
        })
        .await
        .unwrap();
    soyuz.assert_hits_async(1).await;
}

#[tokio::test]
async fn upcoming_uses_its_own_resource_and_default_limit() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/launch/upcoming/")
                .query_param("limit", "5");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page(12, vec![launch("u", "Upcoming")]));
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_secs(60), Duration::from_secs(30));

    let page = adapter
        .list_upcoming_launches(a2g_core::launches::DEFAULT_UPCOMING_LIMIT)
        .await
        .unwrap();
    assert_eq!(page.count, 12);
    adapter
        .list_upcoming_launches(a2g_core::launches::DEFAULT_UPCOMING_LIMIT)
        .await
        .unwrap();
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn upstream_errors_normalize_and_are_not_cached() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/launch/");
            then.status(503).body("maintenance");
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_secs(60), Duration::from_secs(30));

    for _ in 0..2 {
        let err = adapter
            .list_launches(&LaunchFilter::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert!(err.message().contains("503"));
    }
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn client_errors_are_the_same_failure_class() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/launch/upcoming/");
            then.status(429).body("throttled");
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_secs(60), Duration::from_secs(30));

    let err = adapter.list_upcoming_launches(5).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
}

#[tokio::test]
async fn malformed_bodies_are_upstream_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/launch/");
            then.status(200)
                .header("content-type", "application/json")
                .body("{\"detail\": \"not a page\"}");
        })
        .await;
    let adapter = adapter_for(&server, Duration::from_secs(60), Duration::from_secs(30));

    let err = adapter
        .list_launches(&LaunchFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
}

#[tokio::test]
async fn unreachable_provider_is_upstream_unavailable() {
    let cfg = LaunchApiConfig::new("http://127.0.0.1:9".parse().unwrap());
    let adapter = LaunchAdapter::new(&cfg, reqwest::Client::new());
    let err = adapter
        .list_launches(&LaunchFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
}
