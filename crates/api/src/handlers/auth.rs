//! Handlers for the `/auth` resource (account login/registration, device
//! sessions).

use axum::extract::State;
use axum::Json;
use crewpay_core::error::CoreError;
use crewpay_core::identity::{validate_pin, Identity};
use crewpay_core::settings::SalarySettings;
use crewpay_store::repositories::ProfileRepo;
use crewpay_store::StoreError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_pin, verify_pin};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::ProfileView;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub pin: String,
}

/// Request body for `POST /auth/device`.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceRequest {
    /// Previously issued device id to resume. A new one is generated when absent.
    #[serde(default)]
    pub device_id: Option<Uuid>,
}

/// Successful authentication response returned by login and device.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub identity: Identity,
    /// Whether this request created the profile.
    pub created: bool,
    pub profile: ProfileView,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Log in with username + PIN. An unknown username registers a new account
/// with default settings; a known one must present the matching PIN.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let username = input.username.trim();
    let pin = input.pin.trim();
    if username.is_empty() || pin.is_empty() {
        return Err(AppError::BadRequest(
            "Please enter both Username and PIN".into(),
        ));
    }

    let identity = Identity::account(username)?;
    validate_pin(pin)?;

    let (settings, created) = match ProfileRepo::find(&state.store, &identity).await? {
        Some(document) => {
            let hash = document.pin_hash.as_deref().ok_or_else(|| StoreError::Corrupt {
                key: identity.storage_key(),
                reason: "missing PIN hash".into(),
            })?;

            let pin_valid = verify_pin(pin, hash)
                .map_err(|e| AppError::InternalError(format!("PIN verification error: {e}")))?;
            if !pin_valid {
                tracing::info!(%identity, "Rejected login with wrong PIN");
                return Err(AppError::Core(CoreError::Unauthorized(
                    "Wrong PIN! Access Denied.".into(),
                )));
            }

            let settings = match document.settings.validate() {
                Ok(()) => document.settings,
                Err(e) => {
                    tracing::warn!(%identity, error = %e, "Stored settings invalid, using defaults");
                    SalarySettings::default()
                }
            };
            (settings, false)
        }
        None => {
            let pin_hash = hash_pin(pin)
                .map_err(|e| AppError::InternalError(format!("PIN hashing error: {e}")))?;
            let document = ProfileRepo::create_account(&state.store, &identity, pin_hash).await?;
            (document.settings, true)
        }
    };

    tracing::info!(%identity, created, "Account session started");
    let response = create_auth_response(&state, identity, created, settings)?;
    Ok(Json(response))
}

/// POST /api/v1/auth/device
///
/// Start or resume an anonymous device session. The body is optional; the
/// first visit of a device id writes a profile with default settings.
pub async fn device(
    State(state): State<AppState>,
    input: Option<AppJson<DeviceRequest>>,
) -> AppResult<Json<AuthResponse>> {
    let AppJson(input) = input.unwrap_or_default();
    let identity = input
        .device_id
        .map(Identity::device)
        .unwrap_or_else(Identity::new_device);

    let created = !ProfileRepo::exists(&state.store, &identity).await?;
    let settings = ProfileRepo::ensure_device(&state.store, &identity).await?;

    tracing::info!(%identity, created, "Device session started");
    let response = create_auth_response(&state, identity, created, settings)?;
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign a session token and build the response.
fn create_auth_response(
    state: &AppState,
    identity: Identity,
    created: bool,
    settings: SalarySettings,
) -> AppResult<AuthResponse> {
    let token = generate_token(&identity, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        identity,
        created,
        profile: ProfileView::new(settings),
    })
}
