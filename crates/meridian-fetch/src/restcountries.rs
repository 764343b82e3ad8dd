//! Client for the REST Countries v2 directory.

use meridian_core::{FetchError, country::RawCountry, fetch::CountryDirectory};
use reqwest::Client;
use serde::Deserialize;

use crate::http::get_json;

pub const DEFAULT_COUNTRIES_URL: &str =
  "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";

const UPSTREAM: &str = "country directory";

#[derive(Debug, Deserialize)]
struct CountryEntry {
  name:       String,
  capital:    Option<String>,
  region:     Option<String>,
  population: Option<u64>,
  flag:       Option<String>,
  currencies: Option<Vec<CurrencyEntry>>,
}

#[derive(Debug, Deserialize)]
struct CurrencyEntry {
  code: Option<String>,
}

impl From<CountryEntry> for RawCountry {
  fn from(e: CountryEntry) -> Self {
    RawCountry {
      name:           e.name,
      capital:        e.capital,
      region:         e.region,
      population:     e.population,
      currency_codes: e
        .currencies
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| c.code)
        .collect(),
      flag:           e.flag,
    }
  }
}

/// Fetches the full country list in one request.
#[derive(Clone)]
pub struct RestCountriesClient {
  client: Client,
  url:    String,
}

impl RestCountriesClient {
  /// `url` is the complete list endpoint, including any `fields` filter.
  pub fn new(client: Client, url: impl Into<String>) -> Self {
    Self { client, url: url.into() }
  }
}

impl CountryDirectory for RestCountriesClient {
  async fn fetch_countries(&self) -> Result<Vec<RawCountry>, FetchError> {
    let entries: Vec<CountryEntry> = get_json(&self.client, UPSTREAM, &self.url).await?;
    if entries.is_empty() {
      return Err(FetchError::Empty { upstream: UPSTREAM });
    }
    Ok(entries.into_iter().map(RawCountry::from).collect())
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

  const MOCK_JSON: &str = r#"[
    {
      "name": "Nigeria",
      "capital": "Abuja",
      "region": "Africa",
      "population": 206139589,
      "flag": "https://flagcdn.com/ng.svg",
      "currencies": [{"code": "NGN", "name": "Nigerian naira", "symbol": "₦"}],
      "independent": false
    },
    {
      "name": "Antarctica",
      "region": "Polar",
      "population": 1000,
      "flag": "https://flagcdn.com/aq.svg"
    },
    {
      "name": "Zimbabwe",
      "capital": "Harare",
      "region": "Africa",
      "population": 14862927,
      "currencies": [
        {"code": "USD", "name": "United States dollar"},
        {"name": "Zimbabwean bonds"},
        {"code": "BWP", "name": "Botswana pula"}
      ]
    }
  ]"#;

  async fn mock_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/v2/all"))
      .respond_with(ResponseTemplate::new(status).set_body_string(body))
      .mount(&server)
      .await;
    server
  }

  fn client_for(server: &MockServer, timeout: Duration) -> RestCountriesClient {
    RestCountriesClient::new(
      build_client(timeout).unwrap(),
      format!("{}/v2/all?fields=name,capital,region,population,flag,currencies", server.uri()),
    )
  }

  #[tokio::test]
  async fn parses_entries_and_currency_codes() {
    let server = mock_server(200, MOCK_JSON).await;
    let countries = client_for(&server, Duration::from_secs(5))
      .fetch_countries()
      .await
      .unwrap();

    assert_eq!(countries.len(), 3);
    assert_eq!(countries[0].name, "Nigeria");
    assert_eq!(countries[0].capital.as_deref(), Some("Abuja"));
    assert_eq!(countries[0].population, Some(206_139_589));
    assert_eq!(countries[0].currency_codes, vec!["NGN"]);

    assert!(countries[1].currency_codes.is_empty());
    assert_eq!(countries[1].capital, None);

    assert_eq!(countries[2].currency_codes, vec!["USD", "BWP"]);
    assert_eq!(countries[2].flag, None);
  }

  #[tokio::test]
  async fn non_success_status_is_fetch_error() {
    let server = mock_server(502, "bad gateway").await;
    let err = client_for(&server, Duration::from_secs(5))
      .fetch_countries()
      .await
      .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 502, .. }), "got {err:?}");
  }

  #[tokio::test]
  async fn empty_list_is_fetch_error() {
    let server = mock_server(200, "[]").await;
    let err = client_for(&server, Duration::from_secs(5))
      .fetch_countries()
      .await
      .unwrap_err();
    assert!(matches!(err, FetchError::Empty { .. }), "got {err:?}");
  }

  #[tokio::test]
  async fn malformed_body_is_decode_error() {
    let server = mock_server(200, r#"{"message": "not a list"}"#).await;
    let err = client_for(&server, Duration::from_secs(5))
      .fetch_countries()
      .await
      .unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
  }

  #[tokio::test]
  async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/v2/all"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_string(MOCK_JSON)
          .set_delay(Duration::from_secs(2)),
      )
      .mount(&server)
      .await;

    let err = client_for(&server, Duration::from_millis(100))
      .fetch_countries()
      .await
      .unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "got {err:?}");
  }
}
