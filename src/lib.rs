//! Nexus astronomical dataset client.
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | [`config::ApiConfig`] from `NEXUS_*` environment variables |
//! | [`api`] | [`api::ApiClient`] and the typed endpoint groups |
//! | [`fetch`] | [`fetch::FetchHook`], request wrapper with loading/error state |
//! | [`format`] | Display formatting for coordinates, sizes, and counts |
//!
//! The sky-map engine lives in the `skymap` crate.

pub mod api;
pub mod config;
pub mod fetch;
pub mod format;

pub use api::{ApiClient, ApiError};
pub use config::ApiConfig;
pub use fetch::{FetchHook, FetchOptions, FetchState};
