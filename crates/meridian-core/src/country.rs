//! Country records, the raw entries they are built from, and query types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::Error;

// ─── Stored record ───────────────────────────────────────────────────────────

/// One row per nation, keyed case-insensitively by `name`.
///
/// Written only by the refresh orchestrator; every record written by one
/// refresh cycle carries the same `last_refreshed_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
  pub name:              String,
  pub capital:           Option<String>,
  pub region:            String,
  pub population:        u64,
  pub currency_code:     Option<String>,
  pub exchange_rate:     Option<f64>,
  /// Present iff `exchange_rate` is present and non-zero.
  pub estimated_gdp:     Option<f64>,
  pub flag:              Option<String>,
  pub last_refreshed_at: DateTime<Utc>,
}

impl Country {
  /// The natural key used for upserts and point lookups.
  pub fn key(&self) -> String { name_key(&self.name) }
}

/// Normalise a country name into its storage key.
pub fn name_key(name: &str) -> String { name.trim().to_lowercase() }

// ─── Fetcher output ──────────────────────────────────────────────────────────

/// A country entry as returned by the country directory, before it is joined
/// with exchange rates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCountry {
  pub name:           String,
  pub capital:        Option<String>,
  pub region:         Option<String>,
  pub population:     Option<u64>,
  /// Every currency code the entry declares; may be empty.
  pub currency_codes: Vec<String>,
  pub flag:           Option<String>,
}

/// Currency code → rate against the refresh's base currency.
pub type RateTable = HashMap<String, f64>;

// ─── Query types ─────────────────────────────────────────────────────────────

/// Sort orders accepted by [`CountryStore::list`](crate::store::CountryStore::list).
///
/// Both GDP orders place records without an estimate last.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
  GdpDesc,
  GdpAsc,
  PopulationDesc,
  PopulationAsc,
  NameAsc,
  NameDesc,
}

impl SortKey {
  /// Parse an external sort parameter. Unknown keys are an
  /// [`Error::InvalidQuery`], never silently ignored.
  pub fn parse(raw: &str) -> Result<Self, Error> {
    raw.trim().parse().map_err(|_| {
      Error::InvalidQuery(format!(
        "unknown sort key {raw:?}; expected one of gdp_desc, gdp_asc, \
         population_desc, population_asc, name_asc, name_desc"
      ))
    })
  }
}

/// Parameters for [`CountryStore::list`](crate::store::CountryStore::list).
#[derive(Debug, Clone, Default)]
pub struct CountryQuery {
  /// Case-insensitive region filter.
  pub region:   Option<String>,
  /// Case-insensitive currency code filter.
  pub currency: Option<String>,
  /// Defaults to name ascending.
  pub sort:     Option<SortKey>,
  pub limit:    Option<usize>,
}

// ─── Summaries ───────────────────────────────────────────────────────────────

/// Aggregate view of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
  pub total_count:       usize,
  /// Maximum `last_refreshed_at` over all stored records; `None` when empty.
  pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummary {
  pub count:             usize,
  pub last_refreshed_at: DateTime<Utc>,
}
