//! Stateless calculation endpoints for clients that do not keep a profile.

use axum::Json;
use crewpay_core::settings::SalarySettings;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::{CalculationView, DataResponse, ProfileView};

/// POST /api/v1/calculate
///
/// Compute a breakdown for the submitted record without persisting it.
pub async fn calculate(
    AppJson(input): AppJson<SalarySettings>,
) -> AppResult<Json<DataResponse<CalculationView>>> {
    input.validate()?;
    Ok(Json(DataResponse {
        data: CalculationView::of(&input),
    }))
}

/// GET /api/v1/defaults
pub async fn defaults() -> Json<DataResponse<ProfileView>> {
    Json(DataResponse {
        data: ProfileView::new(SalarySettings::default()),
    })
}
