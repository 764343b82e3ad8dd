//! Read handlers for `/countries`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/countries` | Optional `?region`, `?currency`, `?sort` |
//! | `GET`  | `/countries/{name}` | Case-insensitive; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use meridian_core::{
  country::{Country, CountryQuery, SortKey},
  fetch::{CountryDirectory, RateSource},
  store::CountryStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Region filter, e.g. `Africa`.
  pub region:   Option<String>,
  /// Currency code filter, e.g. `NGN`.
  pub currency: Option<String>,
  /// One of the [`SortKey`] names, e.g. `gdp_desc`.
  pub sort:     Option<String>,
}

impl ListParams {
  /// Validate the parameters into a store query. Empty values count as
  /// absent; an unknown sort key is rejected here, before the store is
  /// touched.
  pub fn into_query(self) -> Result<CountryQuery, ApiError> {
    let sort = non_empty(self.sort).map(|s| SortKey::parse(&s)).transpose()?;
    Ok(CountryQuery {
      region: non_empty(self.region),
      currency: non_empty(self.currency),
      sort,
      limit: None,
    })
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

/// `GET /countries[?region=...][&currency=...][&sort=...]`
pub async fn list<S, D, R>(
  State(state): State<AppState<S, D, R>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Country>>, ApiError>
where
  S: CountryStore,
  D: CountryDirectory,
  R: RateSource,
{
  let query = params.into_query()?;
  let countries = state
    .store
    .list(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(countries))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /countries/{name}`
pub async fn get_one<S, D, R>(
  State(state): State<AppState<S, D, R>>,
  Path(name): Path<String>,
) -> Result<Json<Country>, ApiError>
where
  S: CountryStore,
  D: CountryDirectory,
  R: RateSource,
{
  let country = state
    .store
    .get_by_name(&name)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("no country found with name: {name}")))?;
  Ok(Json(country))
}
