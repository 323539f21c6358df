//! # dxlookup-contracts
//!
//! Shared types and the error taxonomy for the dxlookup service.
//!
//! All crates in the workspace import from here. No lookup logic lives in
//! this crate, only data definitions and error types.

pub mod disease;
pub mod error;
pub mod features;
