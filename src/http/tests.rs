//! Tests for the HTTP client module

use super::*;
use crate::auth::Authenticator;
use crate::config::Credentials;
use crate::error::Error;
use crate::pagination::Cursor;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SearchClient {
    let config = SearchClientConfig::builder()
        .base_url(server.uri())
        .page_size(None)
        .build();
    SearchClient::new(config).unwrap()
}

#[test]
fn test_search_client_config_default() {
    let config = SearchClientConfig::default();
    assert_eq!(config.base_url, "https://api.twitter.com/1.1");
    assert_eq!(config.search_path, "/search/tweets.json");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.page_size, Some(100));
    assert!(config.user_agent.starts_with("tweet-archive/"));
}

#[test]
fn test_search_client_config_builder() {
    let config = SearchClientConfig::builder()
        .base_url("http://localhost:9000/")
        .search_path("search.json")
        .timeout(Duration::from_secs(5))
        .page_size(Some(20))
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.page_size, Some(20));
    assert_eq!(config.user_agent, "test-agent/1.0");

    let client = SearchClient::new(config).unwrap();
    assert_eq!(client.endpoint().as_str(), "http://localhost:9000/search.json");
}

#[test]
fn test_search_client_invalid_base_url() {
    let config = SearchClientConfig::builder().base_url("not a url").build();
    let err = SearchClient::new(config).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[test]
fn test_query_params_omit_cursor_at_beginning() {
    let client = SearchClient::new(SearchClientConfig::default()).unwrap();

    let params = client.query_params("@rustlang", Cursor::BEGINNING);
    assert_eq!(
        params,
        vec![
            ("q".to_string(), "@rustlang".to_string()),
            ("count".to_string(), "100".to_string()),
        ]
    );

    let params = client.query_params("@rustlang", Cursor::at(42));
    assert!(params.contains(&("max_id".to_string(), "42".to_string())));
}

#[tokio::test]
async fn test_fetch_page_returns_records_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .and(query_param("q", "@rustlang"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statuses": [
                {"id": 5, "text": "newest"},
                {"id": 4, "text": "middle"},
                {"id": 3, "text": "oldest"}
            ],
            "search_metadata": {"count": 3}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client
        .fetch_page("@rustlang", Cursor::BEGINNING)
        .await
        .unwrap();

    let ids: Vec<_> = page.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![5, 4, 3]);
    assert_eq!(page.records[2].payload["text"], "oldest");
}

#[tokio::test]
async fn test_fetch_page_sends_max_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .and(query_param("max_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"statuses": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client.fetch_page("@rustlang", Cursor::at(3)).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_fetch_page_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch_page("@rustlang", Cursor::BEGINNING)
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "over capacity");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_page_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": []})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch_page("@rustlang", Cursor::BEGINNING)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_fetch_page_connection_refused() {
    let config = SearchClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .timeout(Duration::from_secs(2))
        .build();
    let client = SearchClient::new(config).unwrap();

    let err = client
        .fetch_page("@rustlang", Cursor::BEGINNING)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_fetch_page_signs_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"statuses": [{"id": 1}]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SearchClientConfig::builder()
        .base_url(mock_server.uri())
        .build();
    let auth = Authenticator::new(Credentials::new("ck", "cs", "at", "as"));
    let client = SearchClient::with_auth(config, auth).unwrap();

    let page = client
        .fetch_page("@rustlang", Cursor::BEGINNING)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
}
