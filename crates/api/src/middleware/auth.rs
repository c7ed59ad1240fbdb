//! Bearer-token extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use crewpay_core::error::CoreError;
use crewpay_core::identity::Identity;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The identity behind a valid session token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(profile: AuthProfile) -> AppResult<Json<()>> {
///     tracing::info!(identity = %profile.identity, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthProfile {
    pub identity: Identity,
}

impl FromRequestParts<AppState> for AuthProfile {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let identity = Identity::from_storage_key(&claims.sub).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthProfile { identity })
    }
}
