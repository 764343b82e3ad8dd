//! The `CountryStore` trait.
//!
//! Implemented by storage backends (e.g. `meridian-store-sqlite`). The
//! refresh orchestrator and the HTTP facade depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::country::{Country, CountryQuery, StoreStatus};

/// Abstraction over the relational persistence gateway.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CountryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert or replace every record, matched case-insensitively by name.
  ///
  /// The batch is atomic: readers observe either all of it or none of it.
  /// Returns the number of records written.
  fn upsert_all(
    &self,
    records: Vec<Country>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// List records matching `query` in the requested order.
  fn list<'a>(
    &'a self,
    query: &'a CountryQuery,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + 'a;

  /// Case-insensitive point lookup. Returns `None` if no record matches.
  fn get_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + 'a;

  /// Record count and the latest refresh timestamp across stored records.
  fn status(&self) -> impl Future<Output = Result<StoreStatus, Self::Error>> + Send + '_;
}
