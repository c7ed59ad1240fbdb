//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to `crewpay_core` for computation and to
//! `crewpay_store` for persistence, mapping errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod calculate;
pub mod rates;
pub mod settings;
