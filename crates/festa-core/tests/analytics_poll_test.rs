// Integration tests for the poll-driven `AnalyticsAccessor`.
//
// These use a short poll interval and real time; assertions count
// requests the mock server actually received, with generous margins so
// scheduling jitter cannot flake them.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use festa_api::{ApiClient, TransportConfig};
use festa_core::AnalyticsAccessor;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

async fn setup() -> (MockServer, Arc<AnalyticsAccessor>) {
    let server = MockServer::start().await;
    let base = format!("{}/api", server.uri());
    let config =
        TransportConfig::default().with_base_url(base.parse().expect("mock URI is valid"));
    let api = Arc::new(ApiClient::new(&config).expect("client builds"));
    (server, Arc::new(AnalyticsAccessor::new(api, POLL_INTERVAL)))
}

async fn mount_analytics(server: &MockServer, festival_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/festivals/{festival_id}/analytics/congestion"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"zoneId": "z1", "congestionLevel": "high"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/festivals/{festival_id}/analytics/sns-feedback"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"content": "great show", "sentiment": "positive"}
        ])))
        .mount(server)
        .await;
}

async fn requests_for(server: &MockServer, festival_id: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| {
            r.url
                .path()
                .starts_with(&format!("/api/festivals/{festival_id}/analytics"))
        })
        .count()
}

#[tokio::test]
async fn watching_fetches_immediately_and_then_on_cadence() {
    let (server, accessor) = setup().await;
    mount_analytics(&server, "f1").await;

    let handle = Arc::clone(&accessor).watch_festival("f1");
    tokio::time::sleep(Duration::from_millis(350)).await;

    // Initial pair plus at least two ticks' worth.
    assert!(requests_for(&server, "f1").await >= 6);

    let congestion = accessor.congestion();
    assert_eq!(congestion.items.len(), 1);
    assert_eq!(congestion.items[0].congestion_level.as_deref(), Some("high"));
    assert_eq!(accessor.sns().items.len(), 1);

    handle.stop().await;
}

#[tokio::test]
async fn stopping_the_handle_stops_the_timer() {
    let (server, accessor) = setup().await;
    mount_analytics(&server, "f1").await;

    let handle = Arc::clone(&accessor).watch_festival("f1");
    tokio::time::sleep(Duration::from_millis(150)).await;
    handle.stop().await;

    let settled = requests_for(&server, "f1").await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(requests_for(&server, "f1").await, settled);
}

#[tokio::test]
async fn dropping_the_handle_cancels_the_poll() {
    let (server, accessor) = setup().await;
    mount_analytics(&server, "f1").await;

    {
        let _handle = Arc::clone(&accessor).watch_festival("f1");
        tokio::time::sleep(Duration::from_millis(150)).await;
    }

    // Give the cancelled task a moment to wind down, then verify the
    // request count has stopped moving.
    tokio::time::sleep(Duration::from_millis(150)).await;
    let settled = requests_for(&server, "f1").await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(requests_for(&server, "f1").await, settled);
}

#[tokio::test]
async fn switching_festivals_leaves_exactly_one_active_timer() {
    let (server, accessor) = setup().await;
    mount_analytics(&server, "f1").await;
    mount_analytics(&server, "f2").await;

    let first = Arc::clone(&accessor).watch_festival("f1");
    tokio::time::sleep(Duration::from_millis(150)).await;

    // Selection changes before the next tick: the old poll must be
    // cancelled before the new one takes over.
    first.stop().await;
    let f1_settled = requests_for(&server, "f1").await;
    let second = Arc::clone(&accessor).watch_festival("f2");

    tokio::time::sleep(Duration::from_millis(350)).await;

    assert_eq!(
        requests_for(&server, "f1").await,
        f1_settled,
        "stale poll kept firing against f1"
    );
    assert!(requests_for(&server, "f2").await >= 2);
    assert!(second.is_active());

    second.stop().await;
}

#[tokio::test]
async fn report_is_fetched_once_on_demand_not_polled() {
    let (server, accessor) = setup().await;
    mount_analytics(&server, "f1").await;

    Mock::given(method("GET"))
        .and(path("/api/festivals/f1/analytics/report"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"summary": "total attendance 48,000"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let handle = Arc::clone(&accessor).watch_festival("f1");
    accessor.fetch_report("f1").await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    handle.stop().await;

    let report = accessor.report();
    let record = report.record.as_ref().expect("report present");
    assert_eq!(record["summary"], "total attendance 48,000");
}

#[tokio::test]
async fn poll_failures_surface_in_the_error_field_and_do_not_kill_the_timer() {
    let (server, accessor) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/festivals/f1/analytics/congestion"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "sensor gap"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/festivals/f1/analytics/sns-feedback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let handle = Arc::clone(&accessor).watch_festival("f1");
    tokio::time::sleep(Duration::from_millis(250)).await;

    let congestion = accessor.congestion();
    assert!(congestion.items.is_empty());
    assert!(
        congestion
            .error
            .as_deref()
            .is_some_and(|e| e.contains("sensor gap"))
    );
    // The SNS side keeps polling despite the congestion failures.
    assert!(requests_for(&server, "f1").await >= 4);

    handle.stop().await;
}
