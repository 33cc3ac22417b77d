//! Tests for the HTTP client module

use super::*;
use crate::auth::Credentials;
use crate::engine::PageQuery;
use crate::error::Error;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_credentials() -> Credentials {
    Credentials::parse("ck\ncs\ntk\nts\n").unwrap()
}

fn client_for(server: &MockServer) -> TimelineClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    TimelineClient::new(config, test_credentials()).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.base_url, "https://api.twitter.com");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("timeline-archiver/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .rate_limit(RateLimiterConfig::new(5, 5))
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, "https://api.example.com");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.rate_limit.unwrap().requests_per_second, 5);
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[tokio::test]
async fn test_fetch_page_parses_items() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .and(query_param("screen_name", "sampleuser"))
        .and(query_param("count", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 109, "text": "newest"},
            {"id": 108, "text": "older"}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client
        .fetch_page(&PageQuery::new("sampleuser", 100, None))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0]["id"], 109);
}

#[tokio::test]
async fn test_fetch_page_sends_window_bounds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .and(query_param("since_id", "90"))
        .and(query_param("max_id", "104"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut query = PageQuery::new("sampleuser", 100, Some(90));
    query.max_id = Some(104);

    let client = client_for(&mock_server);
    let page = client.fetch_page(&query).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_fetch_page_applies_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .and(header("authorization", "Bearer tk"))
        .and(header("x-consumer-key", "ck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .fetch_page(&PageQuery::new("sampleuser", 100, None))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rate_limit_uses_reset_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(
            ResponseTemplate::new(429).insert_header("x-rate-limit-reset", "1700000123"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch_page(&PageQuery::new("sampleuser", 100, None))
        .await
        .unwrap_err();

    match err {
        Error::RateLimited { reset } => {
            assert_eq!(reset, Utc.timestamp_opt(1_700_000_123, 0).unwrap());
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_legacy_420_is_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(420))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch_page(&PageQuery::new("sampleuser", 100, None))
        .await
        .unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_rate_limit_falls_back_to_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&mock_server)
        .await;

    let before = Utc::now();
    let client = client_for(&mock_server);
    let err = client
        .fetch_page(&PageQuery::new("sampleuser", 100, None))
        .await
        .unwrap_err();

    match err {
        Error::RateLimited { reset } => {
            let distance = reset - before;
            assert!(distance >= chrono::Duration::seconds(29));
            assert!(distance <= chrono::Duration::seconds(31));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_without_headers_uses_default_distance() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let before = Utc::now();
    let client = client_for(&mock_server);
    let err = client
        .fetch_page(&PageQuery::new("sampleuser", 100, None))
        .await
        .unwrap_err();

    match err {
        Error::RateLimited { reset } => {
            assert!(reset - before >= chrono::Duration::seconds(59));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_success_status_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such user"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch_page(&PageQuery::new("sampleuser", 100, None))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch_page(&PageQuery::new("sampleuser", 100, None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_calls_remaining_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-rate-limit-remaining", "42")
                .set_body_json(json!([{"id": 1}])),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client
        .fetch_page(&PageQuery::new("sampleuser", 100, None))
        .await
        .unwrap();
    assert_eq!(page.calls_remaining, Some(42));
}

#[tokio::test]
async fn test_local_throttle_permits_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();
    let client = TimelineClient::new(config, test_credentials()).unwrap();

    for _ in 0..2 {
        client
            .fetch_page(&PageQuery::new("sampleuser", 100, None))
            .await
            .unwrap();
    }
}
