//! Integration tests for `SocialApiClient` using wiremock HTTP mocks.

use std::time::Duration;

use igpick_social::{normalize, FetchError, SocialApiClient, SocialApiConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SocialApiClient {
    SocialApiClient::new(&SocialApiConfig::new("test-key").with_base_url(base_url))
        .expect("client construction should not fail")
}

fn followers_json(n: usize) -> Vec<serde_json::Value> {
    (0..n)
        .map(|i| {
            json!({
                "username": format!("user{i}"),
                "full_name": format!("User {i}"),
                "is_private": i % 2 == 0,
                "is_verified": false,
                "profile_pic_url": format!("https://cdn.example.com/{i}.jpg")
            })
        })
        .collect()
}

#[tokio::test]
async fn fetch_followers_sends_auth_headers_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .and(query_param("username_or_id_or_url", "ieeeras_iit"))
        .and(query_param("amount", "50"))
        .and(header("x-rapidapi-key", "test-key"))
        .and(header("x-rapidapi-host", "instagram-social-api.p.rapidapi.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "items": followers_json(3) } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client
        .fetch_followers("ieeeras_iit", 50)
        .await
        .expect("should parse followers");

    let records = normalize(raw);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].username, "user0");
    assert_eq!(records[0].full_name, "User 0");
    assert!(records[0].is_private);
    assert!(!records[1].is_private);
}

#[tokio::test]
async fn fetch_followers_accepts_flat_followers_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "followers": followers_json(2) })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client.fetch_followers("foo", 10).await.unwrap();
    assert_eq!(raw.len(), 2);
}

#[tokio::test]
async fn fetch_followers_truncates_to_limit_and_skips_non_objects() {
    let server = MockServer::start().await;

    let mut items = followers_json(15);
    items.insert(0, json!("not-an-object"));
    items.insert(1, json!(42));

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": items })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client.fetch_followers("foo", 10).await.unwrap();
    let records = normalize(raw);
    assert_eq!(records.len(), 10);
    assert_eq!(records[0].username, "user0");
    assert_eq!(records[9].username, "user9");
}

#[tokio::test]
async fn odd_side_fields_do_not_drop_followers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "username": "alice", "user": "alice" },
            { "username": "bob", "followed_at": 1_700_000_000, "follow_timestamp": 1_700_000_000 },
            { "username": "carol" }
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client.fetch_followers("foo", 10).await.unwrap();
    let records = normalize(raw);
    let names: Vec<&str> = records.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, ["alice", "bob", "carol"]);
    assert_eq!(
        records[1].followed_at.map(|t| t.timestamp()),
        Some(1_700_000_000)
    );
}

#[tokio::test]
async fn fetch_followers_clamps_requested_amount() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .and(query_param("amount", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client.fetch_followers("foo", 10_000).await.unwrap();
    assert!(raw.is_empty());
}

#[tokio::test]
async fn non_2xx_status_maps_to_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "message": "You are not subscribed to this API." })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_followers("foo", 50).await.unwrap_err();

    match err {
        FetchError::Upstream {
            status,
            body_excerpt,
        } => {
            assert_eq!(status, 403);
            assert!(
                body_excerpt.contains("not subscribed"),
                "unexpected excerpt: {body_excerpt}"
            );
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn api_message_on_success_status_maps_to_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "User not found" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_followers("ghost", 50).await.unwrap_err();
    assert!(
        matches!(err, FetchError::Upstream { status: 200, ref body_excerpt } if body_excerpt == "User not found"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn invalid_json_maps_to_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_followers("foo", 50).await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)), "got: {err:?}");
}

#[tokio::test]
async fn json_without_follower_list_maps_to_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "count": 0 } })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_followers("foo", 50).await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)), "got: {err:?}");
}

#[tokio::test]
async fn slow_upstream_times_out_as_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "items": followers_json(1) } }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = SocialApiClient::new(
        &SocialApiConfig::new("test-key")
            .with_base_url(server.uri())
            .with_timeout_secs(1),
    )
    .unwrap();

    let err = client.fetch_followers("foo", 50).await.unwrap_err();
    assert!(
        matches!(err, FetchError::Network(ref m) if m.contains("timed out")),
        "expected timeout Network error, got: {err:?}"
    );
}

#[tokio::test]
async fn unreachable_upstream_maps_to_network_error() {
    let client = test_client("http://127.0.0.1:1");
    let err = client.fetch_followers("foo", 50).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got: {err:?}");
}
