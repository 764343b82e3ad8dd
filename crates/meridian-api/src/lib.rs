//! JSON REST API for the Meridian country cache.
//!
//! Exposes an axum [`Router`] backed by any [`CountryStore`] and a
//! [`Refresher`] over any pair of upstream sources. Transport concerns (TLS,
//! tracing middleware, binding) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = meridian_api::api_router(AppState::new(store, refresher));
//! ```

pub mod countries;
pub mod error;
pub mod refresh;
pub mod status;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post},
};
use meridian_core::{
  fetch::{CountryDirectory, RateSource},
  refresh::Refresher,
  store::CountryStore,
};
use serde_json::{Value, json};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, D, R> {
  pub store:     Arc<S>,
  pub refresher: Arc<Refresher<D, R>>,
}

impl<S, D, R> AppState<S, D, R> {
  pub fn new(store: S, refresher: Refresher<D, R>) -> Self {
    Self { store: Arc::new(store), refresher: Arc::new(refresher) }
  }
}

impl<S, D, R> Clone for AppState<S, D, R> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), refresher: Arc::clone(&self.refresher) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, D, R>(state: AppState<S, D, R>) -> Router<()>
where
  S: CountryStore + 'static,
  D: CountryDirectory + 'static,
  R: RateSource + 'static,
{
  Router::new()
    .route("/", get(root))
    .route("/countries", get(countries::list::<S, D, R>))
    .route("/countries/", get(countries::list::<S, D, R>))
    .route("/countries/refresh", post(refresh::handler::<S, D, R>))
    .route("/countries/status", get(status::status::<S, D, R>))
    .route("/countries/summary", get(status::summary::<S, D, R>))
    .route("/countries/{name}", get(countries::get_one::<S, D, R>))
    .with_state(state)
}

async fn root() -> Json<Value> { Json(json!({ "message": "Welcome to Country Cache API" })) }
