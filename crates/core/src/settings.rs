//! The per-identity settings record and its validation policy.
//!
//! The record is flat: hours/minutes pairs, rates, multipliers and the
//! withdrawal currency. Missing fields deserialize to their defaults, so a
//! partially written document still loads. Saving always replaces the whole
//! record.

use serde::{Deserialize, Serialize};

use crate::calculator::calculate;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_BH_HOURS: u32 = 89;
pub const DEFAULT_BH_MINS: u32 = 38;
pub const DEFAULT_P1_HOURS: u32 = 175;
pub const DEFAULT_P1_MINS: u32 = 43;
pub const DEFAULT_P2_HOURS: u32 = 158;
pub const DEFAULT_P2_MINS: u32 = 37;
pub const DEFAULT_NORMAL_RATE: f64 = 120.0;
pub const DEFAULT_PER_DIEM_EURO_MULT: f64 = 4.0;
pub const DEFAULT_PER_DIEM_OTHER_MULT: f64 = 3.5;
pub const DEFAULT_CATHAY_RATE: f64 = 31.6;
pub const DEFAULT_SUPERRICH_RATE_USD: f64 = 34.0;
pub const DEFAULT_SUPERRICH_RATE_TWD: f64 = 1.05;
pub const DEFAULT_BASE_SALARY: f64 = 16_000.0;
pub const DEFAULT_POSITION_ALLOWANCE: f64 = 1_000.0;
pub const DEFAULT_TRANSPORT_RATE: f64 = 700.0;
pub const DEFAULT_TRANSPORT_TRIPS: u32 = 6;

/// Minutes fields must stay below one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Currency the per-diem holding amount is withdrawn in before conversion
/// to THB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalCurrency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "TWD")]
    Twd,
}

impl WithdrawalCurrency {
    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Twd => "TWD",
        }
    }
}

/// Full input set for one identity.
///
/// `p1` is the EUR / AME / AUS per-diem region, `p2` covers every other
/// region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalarySettings {
    pub bh_hours: u32,
    pub bh_mins: u32,
    pub p1_hours: u32,
    pub p1_mins: u32,
    pub p2_hours: u32,
    pub p2_mins: u32,
    /// Base hourly rate for block hours (THB).
    pub normal_rate: f64,
    pub per_diem_euro_mult: f64,
    pub per_diem_other_mult: f64,
    pub withdrawal_currency: WithdrawalCurrency,
    /// USD -> TWD.
    pub cathay_rate: f64,
    /// USD -> THB.
    pub superrich_rate_usd: f64,
    /// TWD -> THB.
    pub superrich_rate_twd: f64,
    pub base_salary: f64,
    pub position_allowance: f64,
    /// THB paid per transport trip.
    pub transport_rate: f64,
    pub transport_trips: u32,
}

impl Default for SalarySettings {
    fn default() -> Self {
        Self {
            bh_hours: DEFAULT_BH_HOURS,
            bh_mins: DEFAULT_BH_MINS,
            p1_hours: DEFAULT_P1_HOURS,
            p1_mins: DEFAULT_P1_MINS,
            p2_hours: DEFAULT_P2_HOURS,
            p2_mins: DEFAULT_P2_MINS,
            normal_rate: DEFAULT_NORMAL_RATE,
            per_diem_euro_mult: DEFAULT_PER_DIEM_EURO_MULT,
            per_diem_other_mult: DEFAULT_PER_DIEM_OTHER_MULT,
            withdrawal_currency: WithdrawalCurrency::Usd,
            cathay_rate: DEFAULT_CATHAY_RATE,
            superrich_rate_usd: DEFAULT_SUPERRICH_RATE_USD,
            superrich_rate_twd: DEFAULT_SUPERRICH_RATE_TWD,
            base_salary: DEFAULT_BASE_SALARY,
            position_allowance: DEFAULT_POSITION_ALLOWANCE,
            transport_rate: DEFAULT_TRANSPORT_RATE,
            transport_trips: DEFAULT_TRANSPORT_TRIPS,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl SalarySettings {
    /// Reject records the calculator cannot make sense of.
    ///
    /// Floats must be finite and non-negative; minutes must be below 60; the
    /// resulting totals must be finite too. Nothing is coerced: the first
    /// offending field is reported.
    pub fn validate(&self) -> Result<(), CoreError> {
        let amounts = [
            ("normal_rate", self.normal_rate),
            ("per_diem_euro_mult", self.per_diem_euro_mult),
            ("per_diem_other_mult", self.per_diem_other_mult),
            ("cathay_rate", self.cathay_rate),
            ("superrich_rate_usd", self.superrich_rate_usd),
            ("superrich_rate_twd", self.superrich_rate_twd),
            ("base_salary", self.base_salary),
            ("position_allowance", self.position_allowance),
            ("transport_rate", self.transport_rate),
        ];
        for (name, value) in amounts {
            validate_non_negative(value, name)?;
        }

        let minutes = [
            ("bh_mins", self.bh_mins),
            ("p1_mins", self.p1_mins),
            ("p2_mins", self.p2_mins),
        ];
        for (name, value) in minutes {
            validate_minutes(value, name)?;
        }

        let breakdown = calculate(self);
        if !breakdown.super_overtime_rate.is_finite() || !breakdown.grand_total.is_finite() {
            return Err(CoreError::Validation(
                "Values are too large to calculate a total".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validate that a value is finite and `>= 0`.
pub fn validate_non_negative(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Validate a minutes component (`0..60`).
pub fn validate_minutes(value: u32, name: &str) -> Result<(), CoreError> {
    if value >= MINUTES_PER_HOUR {
        return Err(CoreError::Validation(format!(
            "{name} must be less than {MINUTES_PER_HOUR}, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
