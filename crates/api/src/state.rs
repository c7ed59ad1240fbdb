use std::sync::Arc;

use crewpay_rates::ExchangeRateApi;
use crewpay_store::ProfileStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Per-identity settings documents.
    pub store: ProfileStore,
    /// Server configuration (token settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Live exchange-rate client.
    pub rates: Arc<ExchangeRateApi>,
}
