//! Exchange-rate derivation from a USD-keyed rate table.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::settings::SalarySettings;

/// Currency code of the Thai baht in rate tables.
pub const THB: &str = "THB";
/// Currency code of the New Taiwan dollar in rate tables.
pub const TWD: &str = "TWD";

/// The three rates the calculator needs, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExchangeRates {
    pub usd_thb: f64,
    pub usd_twd: f64,
    pub twd_thb: f64,
}

impl ExchangeRates {
    /// Derive rates from a table keyed by currency code with USD as base.
    ///
    /// THB and TWD must both be present, finite and positive. The cross
    /// rate uses the unrounded inputs.
    pub fn from_usd_table(rates: &HashMap<String, f64>) -> Result<Self, CoreError> {
        let usd_thb = required_rate(rates, THB)?;
        let usd_twd = required_rate(rates, TWD)?;

        Ok(Self {
            usd_thb: round_rate(usd_thb),
            usd_twd: round_rate(usd_twd),
            twd_thb: round_rate(usd_thb / usd_twd),
        })
    }

    /// Overwrite the rate fields of a settings record.
    pub fn apply_to(&self, settings: &mut SalarySettings) {
        settings.superrich_rate_usd = self.usd_thb;
        settings.cathay_rate = self.usd_twd;
        settings.superrich_rate_twd = self.twd_thb;
    }
}

fn required_rate(rates: &HashMap<String, f64>, code: &str) -> Result<f64, CoreError> {
    match rates.get(code) {
        Some(&rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        _ => Err(CoreError::Validation(format!("Rate data missing: {code}"))),
    }
}

/// Round to two decimals, the precision rates are displayed and stored at.
fn round_rate(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
