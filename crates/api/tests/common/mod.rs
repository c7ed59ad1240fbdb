#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::get as route_get;
use axum::Router;
use crewpay_api::auth::jwt::JwtConfig;
use crewpay_api::config::ServerConfig;
use crewpay_api::router::build_app_router;
use crewpay_api::state::AppState;
use crewpay_rates::ExchangeRateApi;
use crewpay_store::ProfileStore;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

/// Rates URL nothing listens on; refreshes against it fail fast.
pub const UNREACHABLE_RATES_URL: &str = "http://127.0.0.1:9/v6/latest/USD";

/// A router over a throwaway data directory.
pub struct TestApp {
    pub router: Router,
    pub store: ProfileStore,
    _dir: TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(data_dir: &Path, rates_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.to_path_buf(),
        rates_url: rates_url.to_string(),
        rates_timeout_secs: 2,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_expiry_days: 1,
        },
    }
}

/// Build the full application router with all middleware layers, backed by
/// a fresh temporary data directory.
pub async fn build_test_app() -> TestApp {
    build_test_app_with_rates(UNREACHABLE_RATES_URL).await
}

pub async fn build_test_app_with_rates(rates_url: &str) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = test_config(dir.path(), rates_url);

    let store = ProfileStore::open(&config.data_dir)
        .await
        .expect("store should open");
    let rates = ExchangeRateApi::new(
        config.rates_url.clone(),
        Duration::from_secs(config.rates_timeout_secs),
    )
    .expect("rates client should build");

    let state = AppState {
        store: store.clone(),
        config: Arc::new(config.clone()),
        rates: Arc::new(rates),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        _dir: dir,
    }
}

/// Serve a fixed JSON body at `/v6/latest/USD` and return the full URL.
pub async fn spawn_rates_stub(body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/v6/latest/USD",
        route_get(move || {
            let body = body.clone();
            async move { axum::Json(body) }
        }),
    );
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v6/latest/USD")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Log in (or register) and return the parsed response.
pub async fn login(app: Router, username: &str, pin: &str) -> (StatusCode, serde_json::Value) {
    let body = serde_json::json!({ "username": username, "pin": pin });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// Start a fresh device session and return its token.
pub async fn device_token(app: Router) -> String {
    let response = post_json(app, "/api/v1/auth/device", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().expect("token should be a string").to_string()
}

/// Assert two JSON numbers agree to within a cent-fraction.
pub fn assert_amount(value: &serde_json::Value, expected: f64) {
    let actual = value.as_f64().expect("value should be a number");
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
