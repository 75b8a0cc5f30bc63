// Integration tests for the SNS feedback and dashboard accessors.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use festa_api::{ApiClient, TransportConfig};
use festa_core::{DashboardAccessor, SnsAccessor, SnsPost};

async fn setup() -> (MockServer, Arc<ApiClient>) {
    let server = MockServer::start().await;
    let base = format!("{}/api", server.uri());
    let config =
        TransportConfig::default().with_base_url(base.parse().expect("mock URI is valid"));
    let api = Arc::new(ApiClient::new(&config).expect("client builds"));
    (server, api)
}

#[tokio::test]
async fn selecting_a_festival_fetches_feedback_and_sentiment() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sns-feedback/festival/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "p1", "festivalId": "f1", "content": "loved it", "sentiment": "positive"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sns-feedback/festival/f1/sentiment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"positive": 8, "negative": 1, "neutral": 3, "total": 12}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sns = SnsAccessor::new(api);
    sns.set_festival(Some("f1".into())).await;

    let state = sns.state();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].content, "loved it");

    let sentiment = sns.sentiment();
    let summary = sentiment.record.as_ref().expect("sentiment present");
    assert_eq!(summary.positive, 8);
    assert_eq!(summary.total, 12);
}

#[tokio::test]
async fn feedback_fetch_is_a_no_op_without_a_selection() {
    let (server, api) = setup().await;
    let sns = SnsAccessor::new(api);

    sns.fetch_feedback().await;
    sns.fetch_sentiment().await;

    assert!(server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
    assert!(sns.state().items.is_empty());
    assert!(!sns.state().loading);
}

#[tokio::test]
async fn submitting_feedback_resynchronizes_the_scoped_list() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/sns-feedback"))
        .and(body_partial_json(json!({"content": "queue too long"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "p9", "festivalId": "f1", "content": "queue too long"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sns-feedback/festival/f1/sentiment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sns-feedback/festival/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "p9", "festivalId": "f1", "content": "queue too long", "sentiment": "negative"}
        ])))
        .mount(&server)
        .await;

    let sns = SnsAccessor::new(api);
    sns.set_festival(Some("f1".into())).await;

    let post = SnsPost {
        id: None,
        festival_id: Some("f1".into()),
        content: "queue too long".into(),
        source: Some("twitter".into()),
        sentiment: None,
        created_at: None,
    };
    sns.create(&post).await.expect("create succeeds");

    let state = sns.state();
    assert_eq!(state.items.len(), 1);
    // The list reflects the server's copy, including its classification.
    assert_eq!(state.items[0].sentiment.as_deref(), Some("negative"));
    assert!(!state.loading);
}

#[tokio::test]
async fn failed_submission_reraises_and_records_the_error() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/sns-feedback"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "content is required"})),
        )
        .mount(&server)
        .await;

    let sns = SnsAccessor::new(api);
    let post = SnsPost {
        id: None,
        festival_id: Some("f1".into()),
        content: String::new(),
        source: None,
        sentiment: None,
        created_at: None,
    };

    let err = sns.create(&post).await.expect_err("server rejected");
    assert!(err.to_string().contains("content is required"));

    let state = sns.state();
    assert!(!state.loading);
    assert!(state
        .error
        .as_deref()
        .is_some_and(|e| e.contains("content is required")));
}

#[tokio::test]
async fn clearing_the_selection_discards_feedback_state() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sns-feedback/festival/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "p1", "content": "hi"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sns-feedback/festival/f1/sentiment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 1})))
        .mount(&server)
        .await;

    let sns = SnsAccessor::new(api);
    sns.set_festival(Some("f1".into())).await;
    assert_eq!(sns.state().items.len(), 1);

    sns.set_festival(None).await;
    assert!(sns.state().items.is_empty());
    assert!(sns.sentiment().record.is_none());
}

#[tokio::test]
async fn operational_dashboard_snapshot_is_kept_opaque() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/operational"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"runningFestivals": 3, "alerts": [{"zoneId": "z4", "level": "high"}]}
        })))
        .mount(&server)
        .await;

    let dashboard = DashboardAccessor::new(api);
    dashboard.fetch_operational().await;

    let state = dashboard.operational();
    let snapshot = state.record.as_ref().expect("snapshot present");
    assert_eq!(snapshot["runningFestivals"], 3);
    assert_eq!(snapshot["alerts"][0]["zoneId"], "z4");
    assert!(!state.loading);
}

#[tokio::test]
async fn festival_dashboard_failure_lands_in_the_error_field() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/festival/f1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "aggregator down"})))
        .mount(&server)
        .await;

    let dashboard = DashboardAccessor::new(api);
    dashboard.fetch_festival("f1").await;

    let state = dashboard.festival();
    assert!(state.record.is_none());
    assert!(state
        .error
        .as_deref()
        .is_some_and(|e| e.contains("aggregator down")));
    assert!(!state.loading);
}
