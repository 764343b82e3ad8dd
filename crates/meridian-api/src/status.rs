//! Handlers for `/countries/status` and `/countries/summary`.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use meridian_core::{
  country::{CountryQuery, SortKey, StoreStatus},
  fetch::{CountryDirectory, RateSource},
  store::CountryStore,
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Number of countries listed in the summary's GDP ranking.
pub const SUMMARY_TOP_N: usize = 5;

/// `GET /countries/status` — `{total_count, last_refreshed_at}`.
pub async fn status<S, D, R>(
  State(state): State<AppState<S, D, R>>,
) -> Result<Json<StoreStatus>, ApiError>
where
  S: CountryStore,
  D: CountryDirectory,
  R: RateSource,
{
  let status = state
    .store
    .status()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(status))
}

#[derive(Debug, Serialize)]
pub struct RankedCountry {
  pub name:          String,
  pub estimated_gdp: f64,
}

#[derive(Debug, Serialize)]
pub struct Summary {
  pub total_count:       usize,
  pub last_refreshed_at: Option<DateTime<Utc>>,
  pub top_by_gdp:        Vec<RankedCountry>,
}

/// `GET /countries/summary` — status plus the top countries by estimated GDP.
pub async fn summary<S, D, R>(
  State(state): State<AppState<S, D, R>>,
) -> Result<Json<Summary>, ApiError>
where
  S: CountryStore,
  D: CountryDirectory,
  R: RateSource,
{
  let status = state
    .store
    .status()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let query = CountryQuery {
    sort: Some(SortKey::GdpDesc),
    limit: Some(SUMMARY_TOP_N),
    ..Default::default()
  };
  let top_by_gdp = state
    .store
    .list(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .into_iter()
    .filter_map(|c| {
      c.estimated_gdp
        .map(|estimated_gdp| RankedCountry { name: c.name, estimated_gdp })
    })
    .collect();

  Ok(Json(Summary {
    total_count: status.total_count,
    last_refreshed_at: status.last_refreshed_at,
    top_by_gdp,
  }))
}
