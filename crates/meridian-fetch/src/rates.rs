//! Client for the open.er-api.com exchange-rate source.

use meridian_core::{FetchError, country::RateTable, fetch::RateSource};
use reqwest::Client;
use serde::Deserialize;

use crate::http::get_json;

/// Endpoint prefix; the base currency code is appended as the last segment.
pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest";

const UPSTREAM: &str = "exchange-rate source";

#[derive(Debug, Deserialize)]
struct LatestResponse {
  result:     String,
  #[serde(rename = "error-type")]
  error_type: Option<String>,
  #[serde(default)]
  rates:      RateTable,
}

#[derive(Clone)]
pub struct OpenExchangeClient {
  client:   Client,
  base_url: String,
}

impl OpenExchangeClient {
  pub fn new(client: Client, base_url: impl Into<String>) -> Self {
    Self { client, base_url: base_url.into() }
  }

  fn url(&self, base_currency: &str) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), base_currency)
  }
}

impl RateSource for OpenExchangeClient {
  async fn fetch_rates(&self, base_currency: &str) -> Result<RateTable, FetchError> {
    let body: LatestResponse =
      get_json(&self.client, UPSTREAM, &self.url(base_currency)).await?;

    if body.result != "success" {
      return Err(FetchError::Upstream {
        upstream: UPSTREAM,
        message:  body.error_type.unwrap_or(body.result),
      });
    }
    if body.rates.is_empty() {
      return Err(FetchError::Empty { upstream: UPSTREAM });
    }
    Ok(body.rates)
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
  };

  use super::*;
  use crate::build_client;

  async fn mock_server(route: &str, status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path(route))
      .respond_with(ResponseTemplate::new(status).set_body_string(body))
      .mount(&server)
      .await;
    server
  }

  fn client_for(server: &MockServer) -> OpenExchangeClient {
    OpenExchangeClient::new(
      build_client(Duration::from_secs(5)).unwrap(),
      format!("{}/v6/latest/", server.uri()),
    )
  }

  #[tokio::test]
  async fn parses_rate_table() {
    let body = r#"{
      "result": "success",
      "base_code": "USD",
      "rates": {"USD": 1, "NGN": 1567.88, "EUR": 0.92}
    }"#;
    let server = mock_server("/v6/latest/USD", 200, body).await;

    let rates = client_for(&server).fetch_rates("USD").await.unwrap();
    assert_eq!(rates.len(), 3);
    assert_eq!(rates["USD"], 1.0);
    assert_eq!(rates["NGN"], 1567.88);
  }

  #[tokio::test]
  async fn error_result_is_fetch_error() {
    let body = r#"{"result": "error", "error-type": "unsupported-code"}"#;
    let server = mock_server("/v6/latest/XXX", 200, body).await;

    let err = client_for(&server).fetch_rates("XXX").await.unwrap_err();
    match err {
      FetchError::Upstream { message, .. } => assert_eq!(message, "unsupported-code"),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[tokio::test]
  async fn server_error_is_fetch_error() {
    let server = mock_server("/v6/latest/USD", 500, "").await;
    let err = client_for(&server).fetch_rates("USD").await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }), "got {err:?}");
  }

  #[tokio::test]
  async fn unreachable_host_is_transport_error() {
    let client = OpenExchangeClient::new(
      build_client(Duration::from_secs(5)).unwrap(),
      "http://127.0.0.1:1/v6/latest",
    );
    let err = client.fetch_rates("USD").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "got {err:?}");
  }
}
