//! Public routes that need no session.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{calculate, rates};
use crate::state::AppState;

/// ```text
/// POST /calculate   -> calculate (nothing persisted)
/// GET  /defaults    -> defaults
/// GET  /rates       -> get_rates
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate::calculate))
        .route("/defaults", get(calculate::defaults))
        .route("/rates", get(rates::get_rates))
}
