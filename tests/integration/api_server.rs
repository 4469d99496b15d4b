//! Integration tests for the HTTP endpoints

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::test_utils::{usd_balance, TestApp, API_KEY};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApp::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "strike-dca");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApp::new().await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for name in [
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
        "dca_executions_total",
        "dca_skipped_total",
        "dca_failures_total",
        "market_data_fallbacks_total",
        "buy_multiplier",
    ] {
        assert!(body.contains(name), "Expected {} metric", name);
    }
}

#[tokio::test]
async fn requests_are_counted() {
    let app = TestApp::new().await;
    for _ in 0..3 {
        let _ = app.server.get("/health").await;
    }
    assert_eq!(app.metrics.http_requests_total.get(), 3);
    assert_eq!(app.metrics.http_requests_in_flight.get(), 0);
}

#[tokio::test]
async fn balances_endpoint_returns_account_balances() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/balances"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(usd_balance("250.75")))
        .expect(1)
        .mount(&app.strike)
        .await;

    let response = app.server.get("/balances").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body[0]["currency"], "USD");
    assert_eq!(body[0]["available"], json!(250.75));
    assert_eq!(body[1]["currency"], "BTC");
}

#[tokio::test]
async fn balances_endpoint_reports_upstream_failure() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/balances"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&app.strike)
        .await;

    let response = app.server.get("/balances").await;
    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Failed to fetch balances"}));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::new().await;
    let response = app.server.get("/does-not-exist").await;
    assert_eq!(response.status_code(), 404);
}
