//! REST client for a USD-keyed "latest rates" endpoint.
//!
//! Wraps a single `GET` using [`reqwest`]. One attempt per call with a short
//! timeout; callers keep their previous rates on any error.

use std::collections::HashMap;
use std::time::Duration;

use crewpay_core::error::CoreError;
use crewpay_core::exchange::ExchangeRates;
use serde::Deserialize;

/// Public endpoint used when none is configured.
pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Value of `result` in a successful response.
const RESULT_SUCCESS: &str = "success";

/// Body returned by the rates endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestRates {
    /// `"success"` or `"error"`.
    pub result: String,
    #[serde(default)]
    pub base_code: Option<String>,
    #[serde(default)]
    pub time_last_update_utc: Option<String>,
    /// Rate per one unit of the base currency, keyed by currency code.
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

/// Errors from the rates API layer.
#[derive(Debug, thiserror::Error)]
pub enum RatesApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Rates API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body parsed but did not report success.
    #[error("Rates API reported result '{0}'")]
    Unsuccessful(String),

    /// THB or TWD was absent or unusable.
    #[error("{0}")]
    MissingRates(String),
}

/// HTTP client for the rates endpoint.
#[derive(Debug, Clone)]
pub struct ExchangeRateApi {
    client: reqwest::Client,
    url: String,
}

impl ExchangeRateApi {
    /// Create a client for `url` whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RatesApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw latest-rates document.
    pub async fn fetch_latest(&self) -> Result<LatestRates, RatesApiError> {
        let response = self.client.get(&self.url).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<LatestRates>().await?)
    }

    /// Fetch and derive the three rates the calculator uses.
    pub async fn fetch_exchange_rates(&self) -> Result<ExchangeRates, RatesApiError> {
        let latest = self.fetch_latest().await?;
        let rates = latest.exchange_rates()?;
        tracing::info!(
            usd_thb = rates.usd_thb,
            usd_twd = rates.usd_twd,
            twd_thb = rates.twd_thb,
            updated = latest.time_last_update_utc.as_deref().unwrap_or("unknown"),
            "Fetched live exchange rates"
        );
        Ok(rates)
    }

    // ---- private helpers ----

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RatesApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RatesApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl LatestRates {
    /// Derive [`ExchangeRates`] from a successful response.
    pub fn exchange_rates(&self) -> Result<ExchangeRates, RatesApiError> {
        if self.result != RESULT_SUCCESS {
            return Err(RatesApiError::Unsuccessful(self.result.clone()));
        }
        ExchangeRates::from_usd_table(&self.rates)
            .map_err(|e| match e {
                CoreError::Validation(msg) => RatesApiError::MissingRates(msg),
                other => RatesApiError::MissingRates(other.to_string()),
            })
    }
}
