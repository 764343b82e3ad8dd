//! Server configuration, layered from an optional TOML file and `MERIDIAN_*`
//! environment variables.

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use meridian_core::{gdp::DEFAULT_MULTIPLIER_RANGE, refresh::DEFAULT_BASE_CURRENCY};
use meridian_fetch::{DEFAULT_COUNTRIES_URL, DEFAULT_RATES_URL};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub database_path:        PathBuf,
  /// Full list endpoint of the country directory, including `fields`.
  pub countries_url:        String,
  /// Prefix of the exchange-rate endpoint; the base currency is appended.
  pub rates_url:            String,
  pub base_currency:        String,
  pub request_timeout_secs: u64,
  pub multiplier_min:       f64,
  pub multiplier_max:       f64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "0.0.0.0".to_string(),
      port:                 8000,
      database_path:        PathBuf::from("countries.db"),
      countries_url:        DEFAULT_COUNTRIES_URL.to_string(),
      rates_url:            DEFAULT_RATES_URL.to_string(),
      base_currency:        DEFAULT_BASE_CURRENCY.to_string(),
      request_timeout_secs: 30,
      multiplier_min:       *DEFAULT_MULTIPLIER_RANGE.start(),
      multiplier_max:       *DEFAULT_MULTIPLIER_RANGE.end(),
    }
  }
}

impl ServerConfig {
  /// Read `file` (if it exists) and overlay `MERIDIAN_*` variables.
  pub fn load(file: PathBuf) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("MERIDIAN"))
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn request_timeout(&self) -> Duration { Duration::from_secs(self.request_timeout_secs) }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
