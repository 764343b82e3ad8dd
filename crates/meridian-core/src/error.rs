//! Error types for `meridian-core`.

use thiserror::Error;

/// Failure talking to one of the upstream HTTP sources.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("{upstream} request failed: {message}")]
  Transport { upstream: &'static str, message: String },

  #[error("{upstream} request timed out")]
  Timeout { upstream: &'static str },

  #[error("{upstream} returned HTTP {status}")]
  Status { upstream: &'static str, status: u16 },

  #[error("{upstream} returned an undecodable body: {message}")]
  Decode { upstream: &'static str, message: String },

  #[error("{upstream} reported an error: {message}")]
  Upstream { upstream: &'static str, message: String },

  #[error("{upstream} returned no data")]
  Empty { upstream: &'static str },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("external data source unavailable: {0}")]
  Fetch(#[from] FetchError),

  #[error("country not found: {0}")]
  NotFound(String),

  #[error("invalid query: {0}")]
  InvalidQuery(String),

  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a storage backend error.
  pub fn persistence(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Persistence(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
