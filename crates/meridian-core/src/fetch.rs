//! Traits for the two upstream data sources.
//!
//! Implementations perform exactly one network call per invocation; retry
//! policy, if any, belongs to the caller.

use std::future::Future;

use crate::{
  FetchError,
  country::{RateTable, RawCountry},
};

/// A directory of countries (name, capital, region, population, currencies,
/// flag).
pub trait CountryDirectory: Send + Sync {
  fn fetch_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<RawCountry>, FetchError>> + Send + '_;
}

/// A source of exchange rates against a base currency.
pub trait RateSource: Send + Sync {
  fn fetch_rates<'a>(
    &'a self,
    base_currency: &'a str,
  ) -> impl Future<Output = Result<RateTable, FetchError>> + Send + 'a;
}
