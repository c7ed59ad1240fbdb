//! Handlers for the `/settings` resource of the authenticated identity.
//!
//! Every write is a full-record overwrite followed by a recompute.

use axum::extract::State;
use axum::Json;
use crewpay_core::settings::SalarySettings;
use crewpay_store::repositories::ProfileRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthProfile;
use crate::response::{CalculationView, DataResponse, ProfileView};
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get_settings(
    State(state): State<AppState>,
    profile: AuthProfile,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    let settings = ProfileRepo::load(&state.store, &profile.identity).await;
    Ok(Json(DataResponse {
        data: ProfileView::new(settings),
    }))
}

/// PUT /api/v1/settings
///
/// Validates and replaces the whole record. Fields omitted from the body
/// are stored with their default values.
pub async fn update_settings(
    State(state): State<AppState>,
    profile: AuthProfile,
    AppJson(input): AppJson<SalarySettings>,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    input.validate()?;
    ProfileRepo::save(&state.store, &profile.identity, &input).await?;

    Ok(Json(DataResponse {
        data: ProfileView::new(input),
    }))
}

/// DELETE /api/v1/settings
///
/// Restore the default record.
pub async fn reset_settings(
    State(state): State<AppState>,
    profile: AuthProfile,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    let defaults = SalarySettings::default();
    ProfileRepo::save(&state.store, &profile.identity, &defaults).await?;
    tracing::info!(identity = %profile.identity, "Settings reset to defaults");

    Ok(Json(DataResponse {
        data: ProfileView::new(defaults),
    }))
}

/// GET /api/v1/settings/breakdown
pub async fn get_breakdown(
    State(state): State<AppState>,
    profile: AuthProfile,
) -> AppResult<Json<DataResponse<CalculationView>>> {
    let settings = ProfileRepo::load(&state.store, &profile.identity).await;
    Ok(Json(DataResponse {
        data: CalculationView::of(&settings),
    }))
}
