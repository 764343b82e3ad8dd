//! Error type for `meridian-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("population {0} does not fit the storage column")]
  PopulationRange(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
