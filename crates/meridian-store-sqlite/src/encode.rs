//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with microsecond precision and a
//! `Z` suffix, so every value has the same width and `MAX()` over the column
//! picks the latest instant.

use chrono::{DateTime, SecondsFormat, Utc};
use meridian_core::country::{Country, SortKey};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Population ──────────────────────────────────────────────────────────────

pub fn encode_population(p: u64) -> Result<i64> {
  i64::try_from(p).map_err(|_| Error::PopulationRange(p.to_string()))
}

pub fn decode_population(p: i64) -> Result<u64> {
  u64::try_from(p).map_err(|_| Error::PopulationRange(p.to_string()))
}

// ─── Ordering ────────────────────────────────────────────────────────────────

/// `ORDER BY` body for a sort key. Records without a GDP estimate sort last
/// under both GDP orders; ties fall back to the name key.
pub fn order_clause(sort: Option<SortKey>) -> &'static str {
  match sort {
    Some(SortKey::GdpDesc) => "estimated_gdp IS NULL, estimated_gdp DESC, name_key ASC",
    Some(SortKey::GdpAsc) => "estimated_gdp IS NULL, estimated_gdp ASC, name_key ASC",
    Some(SortKey::PopulationDesc) => "population DESC, name_key ASC",
    Some(SortKey::PopulationAsc) => "population ASC, name_key ASC",
    Some(SortKey::NameDesc) => "name_key DESC",
    Some(SortKey::NameAsc) | None => "name_key ASC",
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` that yields a [`RawCountry`].
pub const COUNTRY_COLUMNS: &str = "name_key, name, capital, region, population, currency_code, \
   exchange_rate, estimated_gdp, flag, last_refreshed_at";

/// A `countries` row with columns still in their stored representation.
#[derive(Debug)]
pub struct RawCountry {
  pub name_key:          String,
  pub name:              String,
  pub capital:           Option<String>,
  pub region:            String,
  pub population:        i64,
  pub currency_code:     Option<String>,
  pub exchange_rate:     Option<f64>,
  pub estimated_gdp:     Option<f64>,
  pub flag:              Option<String>,
  pub last_refreshed_at: String,
}

impl RawCountry {
  pub fn encode(c: Country) -> Result<Self> {
    Ok(Self {
      name_key:          c.key(),
      population:        encode_population(c.population)?,
      last_refreshed_at: encode_dt(c.last_refreshed_at),
      name:              c.name,
      capital:           c.capital,
      region:            c.region,
      currency_code:     c.currency_code,
      exchange_rate:     c.exchange_rate,
      estimated_gdp:     c.estimated_gdp,
      flag:              c.flag,
    })
  }

  /// Read a row selected with [`COUNTRY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      name_key:          row.get(0)?,
      name:              row.get(1)?,
      capital:           row.get(2)?,
      region:            row.get(3)?,
      population:        row.get(4)?,
      currency_code:     row.get(5)?,
      exchange_rate:     row.get(6)?,
      estimated_gdp:     row.get(7)?,
      flag:              row.get(8)?,
      last_refreshed_at: row.get(9)?,
    })
  }

  pub fn into_country(self) -> Result<Country> {
    Ok(Country {
      name:              self.name,
      capital:           self.capital,
      region:            self.region,
      population:        decode_population(self.population)?,
      currency_code:     self.currency_code,
      exchange_rate:     self.exchange_rate,
      estimated_gdp:     self.estimated_gdp,
      flag:              self.flag,
      last_refreshed_at: decode_dt(&self.last_refreshed_at)?,
    })
  }
}
