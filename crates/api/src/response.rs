//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use crewpay_core::calculator::{calculate, PayBreakdown};
use crewpay_core::money::PaySummary;
use crewpay_core::settings::SalarySettings;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A breakdown together with its display rendering.
#[derive(Debug, Serialize)]
pub struct CalculationView {
    pub breakdown: PayBreakdown,
    pub summary: PaySummary,
}

impl CalculationView {
    pub fn of(settings: &SalarySettings) -> Self {
        let breakdown = calculate(settings);
        let summary = breakdown.summary();
        Self { breakdown, summary }
    }
}

/// Settings plus the calculation derived from them. Every read or write of
/// a profile answers with this so the client can redraw in one step.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub settings: SalarySettings,
    pub calculation: CalculationView,
}

impl ProfileView {
    pub fn new(settings: SalarySettings) -> Self {
        let calculation = CalculationView::of(&settings);
        Self {
            settings,
            calculation,
        }
    }
}
