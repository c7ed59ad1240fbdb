//! Pay calculation: block-hour tiers, per-diem conversion and the grand total.
//!
//! Pure functions over [`SalarySettings`]. No rounding happens here; values
//! are rounded only when formatted for display (see [`crate::money`]).

use serde::Serialize;

use crate::settings::{SalarySettings, WithdrawalCurrency, MINUTES_PER_HOUR};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Block hours paid at the normal rate.
pub const NORMAL_HOURS_CAP: f64 = 70.0;
/// Block hours above which the super-overtime rate applies.
pub const SUPER_OVERTIME_THRESHOLD: f64 = 80.0;
/// Overtime rate as a multiple of the normal rate.
pub const OVERTIME_MULTIPLIER: f64 = 2.5;
/// Super-overtime rate as a multiple of the normal rate.
pub const SUPER_OVERTIME_MULTIPLIER: f64 = 3.5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Total block hours split into the three pay tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockHourTiers {
    pub total: f64,
    pub normal: f64,
    pub overtime: f64,
    pub super_overtime: f64,
}

/// Income breakdown for one settings record. All amounts are THB except
/// `per_diem_holding`, which is in the holding currency (USD units).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayBreakdown {
    pub block_hours: BlockHourTiers,
    pub overtime_rate: f64,
    pub super_overtime_rate: f64,
    pub normal_income: f64,
    pub overtime_income: f64,
    pub super_overtime_income: f64,
    pub block_hours_income: f64,
    pub withdrawal_currency: WithdrawalCurrency,
    pub per_diem_holding: f64,
    pub per_diem_thb: f64,
    /// Base salary plus position allowance.
    pub fixed_income: f64,
    pub transport_income: f64,
    pub grand_total: f64,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Convert an hours/minutes pair into fractional hours.
pub fn hours_from_parts(hours: u32, minutes: u32) -> f64 {
    f64::from(hours) + f64::from(minutes) / f64::from(MINUTES_PER_HOUR)
}

/// Split total block hours into normal, overtime and super-overtime hours.
///
/// The first 70 hours are normal, the next 10 are overtime, everything
/// above 80 is super-overtime.
pub fn block_hour_tiers(total: f64) -> BlockHourTiers {
    let overtime_band = SUPER_OVERTIME_THRESHOLD - NORMAL_HOURS_CAP;
    BlockHourTiers {
        total,
        normal: total.min(NORMAL_HOURS_CAP),
        overtime: (total - NORMAL_HOURS_CAP).clamp(0.0, overtime_band),
        super_overtime: (total - SUPER_OVERTIME_THRESHOLD).max(0.0),
    }
}

/// Per-diem units earned in the holding currency.
pub fn per_diem_holding(settings: &SalarySettings) -> f64 {
    let region_one = hours_from_parts(settings.p1_hours, settings.p1_mins);
    let region_two = hours_from_parts(settings.p2_hours, settings.p2_mins);
    region_one * settings.per_diem_euro_mult + region_two * settings.per_diem_other_mult
}

/// Convert a holding amount to THB.
///
/// USD withdrawals convert directly at the SuperRich USD rate. TWD
/// withdrawals go USD -> TWD at the Cathay rate, then TWD -> THB at the
/// SuperRich TWD rate.
pub fn convert_per_diem(holding: f64, settings: &SalarySettings) -> f64 {
    match settings.withdrawal_currency {
        WithdrawalCurrency::Usd => holding * settings.superrich_rate_usd,
        WithdrawalCurrency::Twd => holding * settings.cathay_rate * settings.superrich_rate_twd,
    }
}

/// Compute the full income breakdown for a settings record.
pub fn calculate(settings: &SalarySettings) -> PayBreakdown {
    let tiers = block_hour_tiers(hours_from_parts(settings.bh_hours, settings.bh_mins));

    let overtime_rate = settings.normal_rate * OVERTIME_MULTIPLIER;
    let super_overtime_rate = settings.normal_rate * SUPER_OVERTIME_MULTIPLIER;

    let normal_income = tiers.normal * settings.normal_rate;
    let overtime_income = tiers.overtime * overtime_rate;
    let super_overtime_income = tiers.super_overtime * super_overtime_rate;
    let block_hours_income = normal_income + overtime_income + super_overtime_income;

    let holding = per_diem_holding(settings);
    let per_diem_thb = convert_per_diem(holding, settings);

    let fixed_income = settings.base_salary + settings.position_allowance;
    let transport_income = f64::from(settings.transport_trips) * settings.transport_rate;

    PayBreakdown {
        block_hours: tiers,
        overtime_rate,
        super_overtime_rate,
        normal_income,
        overtime_income,
        super_overtime_income,
        block_hours_income,
        withdrawal_currency: settings.withdrawal_currency,
        per_diem_holding: holding,
        per_diem_thb,
        fixed_income,
        transport_income,
        grand_total: block_hours_income + per_diem_thb + fixed_income + transport_income,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
