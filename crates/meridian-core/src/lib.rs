//! Core types and trait definitions for the Meridian country cache.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! fetchers, the SQLite gateway and the HTTP surface all depend on it and
//! plug into the traits it defines.

pub mod country;
pub mod error;
pub mod fetch;
pub mod gdp;
pub mod refresh;
pub mod store;

pub use error::{Error, FetchError, Result};
