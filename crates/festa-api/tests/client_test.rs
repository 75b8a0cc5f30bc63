// Integration tests for `ApiClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use festa_api::{ApiClient, Error, TransportConfig, bearer_token};

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> TransportConfig {
    let base = format!("{}/api", server.uri());
    TransportConfig::default().with_base_url(base.parse().expect("mock server URI is valid"))
}

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&config_for(&server)).expect("client builds");
    (server, client)
}

// ── Happy-path verb/path mapping ────────────────────────────────────

#[tokio::test]
async fn list_festivals_hits_the_collection_path() {
    let (server, client) = setup().await;

    let body = json!([
        {"id": "1", "name": "Spring Lights", "status": "before"},
        {"id": "2", "name": "Harbor Jazz", "status": "during"},
    ]);

    Mock::given(method("GET"))
        .and(path("/api/festivals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let got = client.list_festivals().await.expect("list succeeds");
    assert_eq!(got, body);
}

#[tokio::test]
async fn create_festival_posts_the_draft_unchanged() {
    let (server, client) = setup().await;

    let draft = json!({"name": "Night Market", "location": "Pier 9"});

    Mock::given(method("POST"))
        .and(path("/api/festivals"))
        .and(body_json(&draft))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": "7", "name": "Night Market", "location": "Pier 9"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let got = client.create_festival(&draft).await.expect("create succeeds");
    assert_eq!(got["id"], "7");
}

#[tokio::test]
async fn zone_paths_are_nested_under_the_festival() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/festivals/3/zones/z1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "z1", "festivalId": "3", "name": "Main Stage"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = json!({"name": "Main Stage", "type": "main-stage", "capacity": 500});
    client
        .update_zone("3", "z1", &body)
        .await
        .expect("update succeeds");
}

#[tokio::test]
async fn delete_with_empty_body_is_ok() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/festivals/3/zones/z1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let got = client.delete_zone("3", "z1").await.expect("delete succeeds");
    assert_eq!(got, serde_json::Value::Null);
}

#[tokio::test]
async fn health_is_served_outside_the_api_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "UP"})))
        .expect(1)
        .mount(&server)
        .await;

    let got = client.health().await.expect("health succeeds");
    assert_eq!(got["status"], "UP");
}

// ── Envelope unwrapping ─────────────────────────────────────────────

#[tokio::test]
async fn success_envelope_is_unwrapped() {
    let (server, client) = setup().await;

    let body = json!({
        "success": true,
        "data": {"content": [{"id": "1", "name": "X"}]},
        "message": "ok"
    });

    Mock::given(method("GET"))
        .and(path("/api/festivals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let got = client.list_festivals().await.expect("list succeeds");
    assert_eq!(got, json!({"content": [{"id": "1", "name": "X"}]}));
}

// ── Error translation ───────────────────────────────────────────────

#[tokio::test]
async fn http_401_becomes_an_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/festivals"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.list_festivals().await.expect_err("must fail");
    assert!(matches!(err, Error::Authentication { .. }));
}

#[tokio::test]
async fn server_message_is_surfaced_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/festivals"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"message": "end date precedes start date"})),
        )
        .mount(&server)
        .await;

    let err = client
        .create_festival(&json!({"name": "bad"}))
        .await
        .expect_err("must fail");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "end date precedes start date");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_without_message_falls_back_to_the_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/festivals/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get_festival("9").await.expect_err("must fail");
    assert!(err.is_not_found());
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("404"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_responses_become_a_timeout_error() {
    let server = MockServer::start().await;
    let mut config = config_for(&server);
    config.timeout = Duration::from_millis(100);
    let client = ApiClient::new(&config).expect("client builds");

    Mock::given(method("GET"))
        .and(path("/api/festivals"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = client.list_festivals().await.expect_err("must time out");
    assert!(matches!(err, Error::Timeout { .. }), "got {err:?}");
}

// ── Interceptors ────────────────────────────────────────────────────

#[tokio::test]
async fn bearer_interceptor_decorates_every_request() {
    let server = MockServer::start().await;
    let client = ApiClient::new(&config_for(&server))
        .expect("client builds")
        .with_interceptor(bearer_token("sekrit".into()));

    Mock::given(method("GET"))
        .and(path("/api/festivals"))
        .and(header("authorization", "Bearer sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client.list_festivals().await.expect("list succeeds");
}
