use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crewpay_core::error::CoreError;
use crewpay_rates::RatesApiError;
use crewpay_store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds store, upstream and
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `crewpay_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A settings store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The live exchange-rate lookup failed.
    #[error("Rates error: {0}")]
    Rates(#[from] RatesApiError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Malformed or mistyped request bodies are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- Upstream rate errors ---
            AppError::Rates(err) => {
                tracing::warn!(error = %err, "Exchange rate refresh failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "RATES_UNAVAILABLE",
                    rates_message(err),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `AlreadyExists` maps to 409.
/// - `UnknownAccount` maps to 401 (the token outlived its account).
/// - `Corrupt` maps to 422 so the user learns the profile needs attention.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::AlreadyExists(key) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Profile {key} already exists"),
        ),
        StoreError::UnknownAccount(_) => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Account no longer exists".to_string(),
        ),
        StoreError::Corrupt { key, reason } => {
            tracing::error!(%key, %reason, "Corrupt profile");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CORRUPT_PROFILE",
                format!("Corrupt profile: {key}"),
            )
        }
        other => {
            tracing::error!(error = %other, "Store error");
            internal()
        }
    }
}

/// User-facing text for a failed rate refresh. Upstream bodies are not echoed.
fn rates_message(err: &RatesApiError) -> String {
    match err {
        RatesApiError::Request(e) if e.is_timeout() => "Rate service timed out".to_string(),
        RatesApiError::Request(_) => "Rate service unreachable".to_string(),
        RatesApiError::Api { status, .. } => format!("Rate service returned status {status}"),
        RatesApiError::Unsuccessful(_) => "API Error".to_string(),
        RatesApiError::MissingRates(msg) => msg.clone(),
    }
}
