//! SQL schema for the Meridian SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per country. Rows are only ever inserted or replaced by a refresh
-- batch; nothing deletes from this table.
CREATE TABLE IF NOT EXISTS countries (
    name_key          TEXT PRIMARY KEY,   -- trimmed, lower-cased name
    name              TEXT NOT NULL,
    capital           TEXT,
    region            TEXT NOT NULL DEFAULT '',
    population        INTEGER NOT NULL CHECK (population >= 0),
    currency_code     TEXT,
    exchange_rate     REAL,
    estimated_gdp     REAL,
    flag              TEXT,
    last_refreshed_at TEXT NOT NULL,      -- RFC 3339 UTC, fixed width
    CHECK (estimated_gdp IS NULL OR exchange_rate IS NOT NULL)
);

CREATE INDEX IF NOT EXISTS countries_region_idx    ON countries(region COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS countries_refreshed_idx ON countries(last_refreshed_at);

PRAGMA user_version = 1;
";
