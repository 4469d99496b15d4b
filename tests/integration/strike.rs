//! Integration tests for the Strike exchange client

use serde_json::json;
use strike_dca::services::error::ServiceError;
use strike_dca::services::exchange::ExchangeProvider;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{quote_body, strike_client, usd_balance, API_KEY};

#[tokio::test]
async fn fetches_balances_with_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/balances"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(usd_balance("500.00")))
        .expect(1)
        .mount(&server)
        .await;

    let balances = strike_client(&server)
        .get_account_balances()
        .await
        .expect("balances");

    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].currency, "USD");
    assert_eq!(balances[0].available, 500.0);
}

#[tokio::test]
async fn creates_quote_with_rounded_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/currency-exchange-quotes"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(body_json(json!({
            "sell": "USD",
            "buy": "BTC",
            "amount": {"amount": "123.46", "currency": "USD"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(quote_body("quote-abc")))
        .expect(1)
        .mount(&server)
        .await;

    let quote = strike_client(&server)
        .create_currency_exchange_quote("USD", "BTC", 123.456)
        .await
        .expect("quote");

    assert_eq!(quote.id, "quote-abc");
    assert_eq!(quote.state.as_deref(), Some("NEW"));
    assert_eq!(quote.target.map(|t| t.amount), Some(0.00126));
}

#[tokio::test]
async fn quote_rejection_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/currency-exchange-quotes"))
        .respond_with(ResponseTemplate::new(422).set_body_string("amount too small"))
        .mount(&server)
        .await;

    let err = strike_client(&server)
        .create_currency_exchange_quote("USD", "BTC", 0.01)
        .await
        .expect_err("quote rejected");

    match err {
        ServiceError::Http { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, "amount too small");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn executes_quote_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/currency-exchange-quotes/quote-abc/execute"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    strike_client(&server)
        .execute_currency_exchange("quote-abc")
        .await
        .expect("execution accepted");
}

#[tokio::test]
async fn execute_with_other_success_status_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/currency-exchange-quotes/quote-abc/execute"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    strike_client(&server)
        .execute_currency_exchange("quote-abc")
        .await
        .expect("2xx is tolerated");
}

#[tokio::test]
async fn execute_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/currency-exchange-quotes/expired/execute"))
        .respond_with(ResponseTemplate::new(400).set_body_string("quote expired"))
        .mount(&server)
        .await;

    let err = strike_client(&server)
        .execute_currency_exchange("expired")
        .await
        .expect_err("execution rejected");
    assert!(matches!(err, ServiceError::Http { status: 400, .. }));
}
