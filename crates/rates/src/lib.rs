//! Client for the public exchange-rate endpoint.
//!
//! - [`api`] -- HTTP client and wire types.

pub mod api;

pub use api::{ExchangeRateApi, LatestRates, RatesApiError};
