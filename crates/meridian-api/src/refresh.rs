//! Handler for `POST /countries/refresh`.

use axum::{Json, extract::State};
use meridian_core::{
  country::RefreshSummary,
  fetch::{CountryDirectory, RateSource},
  store::CountryStore,
};

use crate::{AppState, error::ApiError};

/// Run one refresh cycle. Returns `{count, last_refreshed_at}`.
///
/// An upstream failure maps to 503 and leaves stored data untouched.
pub async fn handler<S, D, R>(
  State(state): State<AppState<S, D, R>>,
) -> Result<Json<RefreshSummary>, ApiError>
where
  S: CountryStore,
  D: CountryDirectory,
  R: RateSource,
{
  let summary = state.refresher.refresh(state.store.as_ref()).await?;
  Ok(Json(summary))
}
