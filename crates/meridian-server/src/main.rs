//! Meridian server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, wires the upstream fetchers into a refresher and serves the JSON
//! API over HTTP.

mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use meridian_api::AppState;
use meridian_core::{gdp::UniformMultiplier, refresh::Refresher};
use meridian_fetch::{OpenExchangeClient, RestCountriesClient, build_client};
use meridian_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Meridian country cache server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the configured listen port.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = ServerConfig::load(cli.config)?;
  if let Some(port) = cli.port {
    cfg.port = port;
  }

  let multiplier = UniformMultiplier::new(cfg.multiplier_min, cfg.multiplier_max)
    .with_context(|| {
      format!(
        "invalid multiplier range {}..={}",
        cfg.multiplier_min, cfg.multiplier_max
      )
    })?;

  let store = SqliteStore::open(&cfg.database_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.database_path))?;

  let client = build_client(cfg.request_timeout()).context("failed to build HTTP client")?;
  let refresher = Refresher::new(
    RestCountriesClient::new(client.clone(), cfg.countries_url.clone()),
    OpenExchangeClient::new(client, cfg.rates_url.clone()),
    multiplier,
  )
  .with_base_currency(cfg.base_currency.clone());

  let app = meridian_api::api_router(AppState::new(store, refresher))
    .layer(TraceLayer::new_for_http());

  let address = cfg.address();
  tracing::info!(base_currency = %cfg.base_currency, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
