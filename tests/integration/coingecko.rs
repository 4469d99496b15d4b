//! Integration tests for the CoinGecko market chart client

use strike_dca::services::error::ServiceError;
use strike_dca::services::market_data::MarketDataProvider;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{chart_body, coingecko_client, flat_prices};

#[tokio::test]
async fn fetches_daily_market_chart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("days", "210"))
        .and(query_param("interval", "daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[100.0, 101.5, 99.25])))
        .expect(1)
        .mount(&server)
        .await;

    let chart = coingecko_client(&server)
        .fetch_market_chart("bitcoin", "usd", 210)
        .await
        .expect("chart");

    assert_eq!(chart.prices.len(), 3);
    assert_eq!(chart.prices[1].price, 101.5);
    assert_eq!(chart.prices[0].timestamp, 1_700_000_000_000.0);
}

#[tokio::test]
async fn retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&flat_prices())))
        .mount(&server)
        .await;

    let chart = coingecko_client(&server)
        .fetch_market_chart("bitcoin", "usd", 210)
        .await
        .expect("chart after retry");

    assert_eq!(chart.prices.len(), 210);
    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn retries_rate_limiting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[1.0])))
        .mount(&server)
        .await;

    let chart = coingecko_client(&server)
        .fetch_market_chart("bitcoin", "usd", 1)
        .await
        .expect("chart after rate limiting");
    assert_eq!(chart.prices.len(), 1);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("coin not found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = coingecko_client(&server)
        .fetch_market_chart("nope", "usd", 210)
        .await
        .expect_err("404 fails");

    match err {
        ServiceError::Http { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "coin not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;

    let err = coingecko_client(&server)
        .fetch_market_chart("bitcoin", "usd", 210)
        .await
        .expect_err("exhausted retries");
    assert!(matches!(err, ServiceError::Http { status: 503, .. }));
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"prices\": \"nope\"}"))
        .expect(1)
        .mount(&server)
        .await;

    let err = coingecko_client(&server)
        .fetch_market_chart("bitcoin", "usd", 210)
        .await
        .expect_err("decode fails");
    assert!(matches!(err, ServiceError::Decode(_)));
}
