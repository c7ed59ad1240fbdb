//! HTTP-level integration tests for account and device sessions.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, get_auth, login, post_json};
use crewpay_core::identity::Identity;
use crewpay_core::settings::SalarySettings;
use crewpay_store::repositories::ProfileRepo;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Account login / registration
// ---------------------------------------------------------------------------

/// An unknown username registers a new account with default settings.
#[tokio::test]
async fn test_login_registers_new_account() {
    let app = common::build_test_app().await;

    let (status, json) = login(app.router(), "alice", "1234").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["token"].is_string(), "response must contain token");
    assert!(json["expires_in"].is_number());
    assert_eq!(json["created"], true);
    assert_eq!(json["identity"]["kind"], "account");
    assert_eq!(json["identity"]["username"], "alice");
    assert_eq!(json["profile"]["settings"]["bh_hours"], 89);
    assert_eq!(
        json["profile"]["calculation"]["summary"]["total"],
        "79,418.85 THB"
    );

    let identity = Identity::account("alice").unwrap();
    let document = ProfileRepo::find(&app.store, &identity).await.unwrap().unwrap();
    let hash = document.pin_hash.expect("account must store a PIN hash");
    assert!(hash.starts_with("$argon2id$"), "PIN must not be stored in plaintext");
}

/// A returning user with the right PIN gets their saved settings back.
#[tokio::test]
async fn test_login_existing_account() {
    let app = common::build_test_app().await;
    login(app.router(), "bob", "4321").await;

    let identity = Identity::account("bob").unwrap();
    let saved = SalarySettings {
        bh_hours: 72,
        ..Default::default()
    };
    ProfileRepo::save(&app.store, &identity, &saved).await.unwrap();

    let (status, json) = login(app.router(), "bob", "4321").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["created"], false);
    assert_eq!(json["profile"]["settings"]["bh_hours"], 72);
}

/// The wrong PIN is rejected and the stored record is untouched.
#[tokio::test]
async fn test_login_wrong_pin() {
    let app = common::build_test_app().await;
    login(app.router(), "carol", "1111").await;
    let identity = Identity::account("carol").unwrap();
    let before = ProfileRepo::find(&app.store, &identity).await.unwrap().unwrap();

    let (status, json) = login(app.router(), "carol", "2222").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Wrong PIN! Access Denied.");
    let after = ProfileRepo::find(&app.store, &identity).await.unwrap().unwrap();
    assert_eq!(before, after);
}

/// Blank username or PIN is a 400 with the prompt message.
#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = common::build_test_app().await;

    let (status, json) = login(app.router(), "  ", "1234").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please enter both Username and PIN");

    let (status, _) = login(app.router(), "dave", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Malformed PINs and unsafe usernames are validation errors.
#[tokio::test]
async fn test_login_validation_errors() {
    let app = common::build_test_app().await;

    let (status, json) = login(app.router(), "erin", "12ab").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, json) = login(app.router(), "../etc/passwd", "1234").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// A corrupt account document surfaces as 422 rather than silently resetting.
#[tokio::test]
async fn test_login_corrupt_profile() {
    let app = common::build_test_app().await;
    let identity = Identity::account("frank").unwrap();
    std::fs::write(app.store.document_path(&identity), "not json").unwrap();

    let (status, json) = login(app.router(), "frank", "1234").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "CORRUPT_PROFILE");
}

// ---------------------------------------------------------------------------
// Device sessions
// ---------------------------------------------------------------------------

/// A device session without an id gets a fresh one and a default profile.
#[tokio::test]
async fn test_device_session_created() {
    let app = common::build_test_app().await;

    let response = post_json(app.router(), "/api/v1/auth/device", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["created"], true);
    assert_eq!(json["identity"]["kind"], "device");
    let id = json["identity"]["id"].as_str().unwrap();
    let identity = Identity::device(id.parse().unwrap());
    assert!(ProfileRepo::exists(&app.store, &identity).await.unwrap());
}

/// The device body is optional; an empty POST starts a fresh session.
#[tokio::test]
async fn test_device_session_without_body() {
    let app = common::build_test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/device")
        .body(Body::empty())
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["created"], true);
    assert_eq!(json["identity"]["kind"], "device");
}

/// A device id that is not a UUID is a 400 in the error envelope.
#[tokio::test]
async fn test_device_session_rejects_malformed_id() {
    let app = common::build_test_app().await;

    let response = post_json(
        app.router(),
        "/api/v1/auth/device",
        serde_json::json!({ "device_id": "not-a-uuid" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

/// Presenting a known device id resumes that profile.
#[tokio::test]
async fn test_device_session_resumed() {
    let app = common::build_test_app().await;
    let identity = Identity::new_device();
    let saved = SalarySettings {
        transport_trips: 11,
        ..Default::default()
    };
    ProfileRepo::save(&app.store, &identity, &saved).await.unwrap();
    let Identity::Device { id } = &identity else {
        unreachable!()
    };

    let response = post_json(
        app.router(),
        "/api/v1/auth/device",
        serde_json::json!({ "device_id": id }),
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["created"], false);
    assert_eq!(json["identity"]["id"], id.to_string());
    assert_eq!(json["profile"]["settings"]["transport_trips"], 11);
}

// ---------------------------------------------------------------------------
// Token enforcement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = common::build_test_app().await;

    let response = get(app.router(), "/api/v1/settings").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = common::build_test_app().await;

    let response = get_auth(app.router(), "/api/v1/settings", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

/// A token issued with another secret is rejected.
#[tokio::test]
async fn test_foreign_token_rejected() {
    let app = common::build_test_app().await;
    let foreign = crewpay_api::auth::jwt::JwtConfig {
        secret: "some-other-secret".into(),
        token_expiry_days: 1,
    };
    let token =
        crewpay_api::auth::jwt::generate_token(&Identity::new_device(), &foreign).unwrap();

    let response = get_auth(app.router(), "/api/v1/settings", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
