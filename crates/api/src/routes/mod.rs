pub mod auth;
pub mod health;
pub mod public;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                    login or register (public)
/// /auth/device                   device session (public)
///
/// /settings                      get, replace, reset (requires auth)
/// /settings/breakdown            breakdown of saved settings
/// /settings/rates/refresh        pull live rates into saved settings (POST)
///
/// /calculate                     anonymous calculation (POST)
/// /defaults                      default settings
/// /rates                         live exchange rates
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/settings", settings::router())
        .merge(public::router())
}
