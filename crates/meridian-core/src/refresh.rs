//! The refresh pipeline: fetch → join → compute → persist.
//!
//! One call to [`Refresher::refresh`] is one refresh cycle. Both fetches
//! complete before anything is written, so a fetch failure leaves the store
//! untouched. Concurrent cycles are not serialised against each other; each
//! batch is still written atomically by the store.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, SubsecRound as _, Utc};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  country::{Country, RateTable, RawCountry, RefreshSummary},
  fetch::{CountryDirectory, RateSource},
  gdp::{MultiplierSource, estimate_gdp, round_2dp},
  store::CountryStore,
};

/// Base currency used when none is configured.
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// Drives refresh cycles against a pair of upstream sources.
pub struct Refresher<D, R> {
  directory:     D,
  rates:         R,
  multiplier:    Arc<dyn MultiplierSource>,
  base_currency: String,
}

impl<D, R> Refresher<D, R>
where
  D: CountryDirectory,
  R: RateSource,
{
  pub fn new(directory: D, rates: R, multiplier: impl MultiplierSource + 'static) -> Self {
    Self {
      directory,
      rates,
      multiplier: Arc::new(multiplier),
      base_currency: DEFAULT_BASE_CURRENCY.to_owned(),
    }
  }

  pub fn with_base_currency(mut self, code: impl Into<String>) -> Self {
    self.base_currency = code.into();
    self
  }

  pub fn base_currency(&self) -> &str { &self.base_currency }

  /// Run one refresh cycle and write its records to `store`.
  pub async fn refresh<S: CountryStore>(&self, store: &S) -> Result<RefreshSummary> {
    let stamp = cycle_timestamp(
      Utc::now(),
      store.status().await.map_err(Error::persistence)?.last_refreshed_at,
    );

    let (countries, rates) = futures::try_join!(
      self.directory.fetch_countries(),
      self.rates.fetch_rates(&self.base_currency),
    )?;
    debug!(
      countries = countries.len(),
      rates = rates.len(),
      base = %self.base_currency,
      "fetched upstream data"
    );

    let multiplier = self.multiplier.draw();
    let records = build_records(countries, &rates, multiplier, stamp);
    let count = store.upsert_all(records).await.map_err(Error::persistence)?;

    info!(count, multiplier, last_refreshed_at = %stamp, "refresh cycle complete");
    Ok(RefreshSummary { count, last_refreshed_at: stamp })
  }
}

/// The stamp for a cycle starting at `now`: never earlier than the previous
/// cycle's, and truncated to the microsecond precision the store keeps.
pub fn cycle_timestamp(
  now: DateTime<Utc>,
  previous: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
  let now = now.trunc_subsecs(6);
  match previous {
    Some(prev) if prev > now => prev,
    _ => now,
  }
}

/// Pick the currency a country is priced in: the lexicographically smallest
/// non-empty declared code, upper-cased.
pub fn resolve_currency(codes: &[String]) -> Option<String> {
  codes
    .iter()
    .map(|c| c.trim())
    .filter(|c| !c.is_empty())
    .min()
    .map(str::to_uppercase)
}

/// Join raw countries with the rate table into upsert-ready records.
///
/// Entries with a blank name are dropped. Entries whose names collide
/// case-insensitively collapse to the last one seen.
pub fn build_records(
  raw: Vec<RawCountry>,
  rates: &RateTable,
  multiplier: f64,
  stamp: DateTime<Utc>,
) -> Vec<Country> {
  let mut by_key: BTreeMap<String, Country> = BTreeMap::new();

  for entry in raw {
    let name = entry.name.trim().to_owned();
    if name.is_empty() {
      warn!(?entry, "skipping country entry without a name");
      continue;
    }

    let population    = entry.population.unwrap_or(0);
    let currency_code = resolve_currency(&entry.currency_codes);
    let exchange_rate = currency_code
      .as_deref()
      .and_then(|code| rates.get(code).copied())
      .filter(|rate| rate.is_finite() && *rate > 0.0);
    let estimated_gdp = exchange_rate
      .and_then(|rate| estimate_gdp(population, rate, multiplier))
      .map(round_2dp);

    if currency_code.is_some() && exchange_rate.is_none() {
      debug!(country = %name, currency = ?currency_code, "no exchange rate for currency");
    }

    let record = Country {
      name,
      capital: entry.capital.filter(|c| !c.trim().is_empty()),
      region: entry.region.unwrap_or_default(),
      population,
      currency_code,
      exchange_rate,
      estimated_gdp,
      flag: entry.flag,
      last_refreshed_at: stamp,
    };

    if let Some(previous) = by_key.insert(record.key(), record) {
      warn!(country = %previous.name, "duplicate country name in directory; keeping the later entry");
    }
  }

  by_key.into_values().collect()
}
