//! Route definitions for the `/settings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{rates, settings};
use crate::state::AppState;

/// Routes mounted at `/settings` (all require a session token).
///
/// ```text
/// GET    /                -> get_settings
/// PUT    /                -> update_settings
/// DELETE /                -> reset_settings
/// GET    /breakdown       -> get_breakdown
/// POST   /rates/refresh   -> refresh_rates
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(settings::get_settings)
                .put(settings::update_settings)
                .delete(settings::reset_settings),
        )
        .route("/breakdown", get(settings::get_breakdown))
        .route("/rates/refresh", post(rates::refresh_rates))
}
