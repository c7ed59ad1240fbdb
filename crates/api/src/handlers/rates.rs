//! Live exchange-rate lookup and refresh.

use axum::extract::State;
use axum::Json;
use crewpay_core::exchange::ExchangeRates;
use crewpay_store::repositories::ProfileRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthProfile;
use crate::response::{DataResponse, ProfileView};
use crate::state::AppState;

/// Body of a successful refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub rates: ExchangeRates,
    pub profile: ProfileView,
}

/// GET /api/v1/rates
///
/// Current USD -> THB, USD -> TWD and TWD -> THB rates from the live source.
pub async fn get_rates(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ExchangeRates>>> {
    let rates = state.rates.fetch_exchange_rates().await?;
    Ok(Json(DataResponse { data: rates }))
}

/// POST /api/v1/settings/rates/refresh
///
/// Fetch live rates, write them into the identity's settings and save.
/// Any upstream failure aborts before the record is touched.
pub async fn refresh_rates(
    State(state): State<AppState>,
    profile: AuthProfile,
) -> AppResult<Json<DataResponse<RefreshResponse>>> {
    let rates = state.rates.fetch_exchange_rates().await?;

    let mut settings = ProfileRepo::load(&state.store, &profile.identity).await;
    rates.apply_to(&mut settings);
    ProfileRepo::save(&state.store, &profile.identity, &settings).await?;

    tracing::info!(identity = %profile.identity, source = state.rates.url(), "Rates updated");
    Ok(Json(DataResponse {
        data: RefreshResponse {
            rates,
            profile: ProfileView::new(settings),
        },
    }))
}
