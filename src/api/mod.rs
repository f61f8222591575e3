//! HTTP client for the Nexus backend.
//!
//! One [`ApiClient`] per process, built from an explicit
//! [`crate::config::ApiConfig`]. Endpoint groups live in submodules as
//! `impl ApiClient` blocks, each returning typed records.

pub mod ai;
pub mod analytics;
pub mod client;
pub mod datasets;
pub mod ingestion;
pub mod types;


pub use client::ApiClient;
pub use types::{Extra, ListResponse, RecordId, ServerErrorBody};

/// Message shown when nothing more specific is available.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Errors from API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The request never got a response (connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: Option<ServerErrorBody> },

    /// The response body did not match the expected record.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// Local file access failed (uploads, downloads).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Human-readable message: the server's `message` field, then its
    /// `detail` field, then this error's own description.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Self::Status { body: Some(body), .. } = self {
            if let Some(msg) = body.message.as_deref().filter(|m| !m.trim().is_empty()) {
                return msg.to_owned();
            }
            if let Some(detail) = body.detail_text() {
                return detail;
            }
        }
        let own = self.to_string();
        if own.trim().is_empty() { FALLBACK_ERROR_MESSAGE.to_owned() } else { own }
    }

    /// HTTP status, when the server responded.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether repeating the same request may succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => matches!(status, 408 | 429) || *status >= 500,
            Self::ClientBuild(_) | Self::Decode(_) | Self::Io(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() { Self::Decode(e.to_string()) } else { Self::Network(e.to_string()) }
    }
}
