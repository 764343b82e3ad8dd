//! [`SqliteStore`] — the SQLite implementation of [`CountryStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::debug;

use meridian_core::{
  country::{Country, CountryQuery, StoreStatus, name_key},
  store::CountryStore,
};

use crate::{
  Result,
  encode::{COUNTRY_COLUMNS, RawCountry, decode_dt, order_clause},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A country store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every call is
/// one closure on the connection's background thread, so a batch upsert is
/// never interleaved with a concurrent read.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CountryStore impl ───────────────────────────────────────────────────────

impl CountryStore for SqliteStore {
  type Error = crate::Error;

  async fn upsert_all(&self, records: Vec<Country>) -> Result<usize> {
    let rows = records
      .into_iter()
      .map(RawCountry::encode)
      .collect::<Result<Vec<_>>>()?;

    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare_cached(
            "INSERT INTO countries (
               name_key, name, capital, region, population, currency_code,
               exchange_rate, estimated_gdp, flag, last_refreshed_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT (name_key) DO UPDATE SET
               name              = excluded.name,
               capital           = excluded.capital,
               region            = excluded.region,
               population        = excluded.population,
               currency_code     = excluded.currency_code,
               exchange_rate     = excluded.exchange_rate,
               estimated_gdp     = excluded.estimated_gdp,
               flag              = excluded.flag,
               last_refreshed_at = excluded.last_refreshed_at",
          )?;

          for row in &rows {
            stmt.execute(rusqlite::params![
              row.name_key,
              row.name,
              row.capital,
              row.region,
              row.population,
              row.currency_code,
              row.exchange_rate,
              row.estimated_gdp,
              row.flag,
              row.last_refreshed_at,
            ])?;
          }
        }
        // Dropping `tx` without committing rolls the whole batch back.
        tx.commit()?;
        Ok(rows.len())
      })
      .await?;

    debug!(written, "upserted country batch");
    Ok(written)
  }

  async fn list(&self, query: &CountryQuery) -> Result<Vec<Country>> {
    let region   = query.region.clone();
    let currency = query.currency.clone();
    let limit    = query.limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let sql      = format!(
      "SELECT {COUNTRY_COLUMNS}
       FROM countries
       WHERE (?1 IS NULL OR region = ?1 COLLATE NOCASE)
         AND (?2 IS NULL OR currency_code = ?2 COLLATE NOCASE)
       ORDER BY {}
       LIMIT ?3",
      order_clause(query.sort),
    );

    let raws: Vec<RawCountry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![region.as_deref(), currency.as_deref(), limit],
            RawCountry::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCountry::into_country).collect()
  }

  async fn get_by_name(&self, name: &str) -> Result<Option<Country>> {
    let key = name_key(name);

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COUNTRY_COLUMNS} FROM countries WHERE name_key = ?1"),
            rusqlite::params![key],
            RawCountry::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn status(&self) -> Result<StoreStatus> {
    let (count, last): (i64, Option<String>) = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*), MAX(last_refreshed_at) FROM countries",
          [],
          |row| Ok((row.get(0)?, row.get(1)?)),
        )?)
      })
      .await?;

    Ok(StoreStatus {
      total_count:       usize::try_from(count).unwrap_or_default(),
      last_refreshed_at: last.as_deref().map(decode_dt).transpose()?,
    })
  }
}
