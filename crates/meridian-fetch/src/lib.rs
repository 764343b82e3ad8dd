//! HTTP clients for the upstream country directory and exchange-rate source.
//!
//! Both clients implement the fetch traits from [`meridian_core::fetch`] and
//! make a single attempt per call.

mod http;
mod rates;
mod restcountries;

pub use rates::{DEFAULT_RATES_URL, OpenExchangeClient};
pub use restcountries::{DEFAULT_COUNTRIES_URL, RestCountriesClient};

pub use http::build_client;
