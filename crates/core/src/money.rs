//! Display formatting for amounts. Presentation only: the calculator never
//! rounds.

use serde::Serialize;

use crate::calculator::PayBreakdown;

/// Currency suffix for every displayed total.
pub const DISPLAY_CURRENCY: &str = "THB";

/// Format an amount with thousands separators and two decimals,
/// e.g. `79418.85` -> `"79,418.85"`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" reads badly; only show the sign when something survives rounding.
    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}

/// Format an amount followed by ` THB`.
pub fn format_thb(value: f64) -> String {
    format!("{} {DISPLAY_CURRENCY}", format_amount(value))
}

/// One labelled line of the display summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

/// Human-readable rendering of a [`PayBreakdown`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaySummary {
    pub total: String,
    pub rows: Vec<SummaryRow>,
}

impl PayBreakdown {
    /// Rows shown under the headline total.
    pub fn summary(&self) -> PaySummary {
        let row = |label: String, value: f64| SummaryRow {
            label,
            value: format_amount(value),
        };

        PaySummary {
            total: format_thb(self.grand_total),
            rows: vec![
                row("Block Hours Income".into(), self.block_hours_income),
                row("Per Diem Base".into(), self.per_diem_holding),
                row(format!("Per Diem ({DISPLAY_CURRENCY})"), self.per_diem_thb),
                row("Base + Allowance".into(), self.fixed_income),
                row("Transport".into(), self.transport_income),
            ],
        }
    }
}
