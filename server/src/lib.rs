//! # dxlookup-server
//!
//! The HTTP service around the dxlookup core: configuration, startup wiring
//! and the axum router. The `dxlookup` binary adds a CLI on top.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

#[cfg(test)]
mod testing;

pub use api::{cors_layer, router};
pub use config::ServiceConfig;
pub use state::AppState;
