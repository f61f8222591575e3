//! API client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend base URL without a trailing slash.
    pub base_url: String,
    /// Bearer token sent as `Authorization` when present.
    pub auth_token: Option<String>,
    pub timeouts: Timeouts,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_URL.to_owned(), auth_token: None, timeouts: Timeouts::default() }
    }
}

impl ApiConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `NEXUS_API_URL`: default `http://localhost:5000`
    /// - `NEXUS_AUTH_TOKEN`: unset or empty means no auth header
    /// - `NEXUS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `NEXUS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL is not http(s) or a
    /// timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("NEXUS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let auth_token = std::env::var("NEXUS_AUTH_TOKEN").ok();
        let timeouts = Timeouts {
            request_secs: env_parse_secs("NEXUS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_secs("NEXUS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        Self::new(&base_url, auth_token, timeouts)
    }

    /// Validate and normalize explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `base_url` is not http(s).
    pub fn new(base_url: &str, auth_token: Option<String>, timeouts: Timeouts) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            auth_token: auth_token.filter(|t| !t.trim().is_empty()),
            timeouts,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid { var: "NEXUS_API_URL", reason: format!("expected http(s) URL, got '{raw}'") });
    }
    Ok(trimmed.to_owned())
}

fn env_parse_secs(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid { var, reason: "must be greater than zero".into() }),
        Ok(secs) => Ok(secs),
        Err(e) => Err(ConfigError::Invalid { var, reason: format!("'{raw}': {e}") }),
    }
}
