//! Shared request plumbing: client construction, status checks and mapping
//! `reqwest` failures into [`FetchError`].

use std::time::Duration;

use meridian_core::FetchError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Build the HTTP client shared by both fetchers.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
  Client::builder()
    .timeout(timeout)
    .user_agent(concat!("meridian/", env!("CARGO_PKG_VERSION")))
    .build()
}

fn map_reqwest(upstream: &'static str, e: reqwest::Error) -> FetchError {
  if e.is_timeout() {
    FetchError::Timeout { upstream }
  } else if e.is_decode() {
    FetchError::Decode { upstream, message: e.to_string() }
  } else {
    FetchError::Transport { upstream, message: e.to_string() }
  }
}

/// `GET url` and decode the JSON body as `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
  client: &Client,
  upstream: &'static str,
  url: &str,
) -> Result<T, FetchError> {
  debug!(upstream, url, "fetching");

  let response = client
    .get(url)
    .send()
    .await
    .map_err(|e| map_reqwest(upstream, e))?;

  let status = response.status();
  if !status.is_success() {
    return Err(FetchError::Status { upstream, status: status.as_u16() });
  }

  let body = response.text().await.map_err(|e| map_reqwest(upstream, e))?;

  serde_json::from_str(&body).map_err(|e| {
    error!(upstream, error = ?e, "failed to parse upstream response");
    FetchError::Decode { upstream, message: e.to_string() }
  })
}
