//! Domain logic for the crew pay calculator.
//!
//! Everything in this crate is pure: no I/O, no async. The store, the rates
//! client and the HTTP API all build on these types.

pub mod calculator;
pub mod error;
pub mod exchange;
pub mod identity;
pub mod money;
pub mod settings;
