//! Shared request plumbing: URL joining, auth, request ids, status mapping.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{ApiError, ServerErrorBody};
use crate::config::ApiConfig;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Bytes escaped inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\');

/// API path from literal prefix parts and caller-supplied segments.
/// Each part is percent-encoded, so an id can never add a path component
/// or start a query.
#[must_use]
pub fn api_path(parts: &[&str]) -> String {
    parts.iter().fold(String::new(), |mut path, part| {
        path.push('/');
        path.extend(utf8_percent_encode(part, SEGMENT));
        path
    })
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Option<HeaderValue>,
}

impl ApiClient {
    /// Build a client with the configured timeouts and auth token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the token is not a valid header
    /// value or the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        let auth = config
            .auth_token
            .as_deref()
            .map(|token| {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| ApiError::ClientBuild(format!("invalid auth token: {e}")))?;
                value.set_sensitive(true);
                Ok::<_, ApiError>(value)
            })
            .transpose()?;
        Ok(Self { http, base_url: config.base_url.clone(), auth })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/datasets/7`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(auth) = &self.auth {
            builder = builder.header(AUTHORIZATION, auth.clone());
        }
        builder
    }

    /// Send `builder` and return the response if its status is a success.
    pub(crate) async fn send(&self, method: &Method, path: &str, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%method, path, %request_id, "api request");

        let response = builder.header(REQUEST_ID_HEADER, request_id.to_string()).send().await.map_err(|e| {
            tracing::warn!(%method, path, %request_id, error = %e, "network error - check the connection");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%method, path, %request_id, status = status.as_u16(), "api response");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = ServerErrorBody::parse(&text);
        match status.as_u16() {
            401 => tracing::warn!(path, %request_id, "unauthorized - log in again"),
            403 => tracing::warn!(path, %request_id, "forbidden - access denied"),
            s if s >= 500 => tracing::error!(path, %request_id, status = s, "server error - try again later"),
            s => tracing::warn!(path, %request_id, status = s, body = %text, "api error response"),
        }
        Err(ApiError::Status { status: status.as_u16(), body })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &impl Serialize) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.send(&Method::GET, path, builder).await?;
        decode(response).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.send(&Method::POST, path, builder).await?;
        decode(response).await
    }

    /// POST without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path);
        let response = self.send(&Method::POST, path, builder).await?;
        decode(response).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::DELETE, path);
        let response = self.send(&Method::DELETE, path, builder).await?;
        decode(response).await
    }

    pub(crate) async fn get_bytes(&self, path: &str, query: &impl Serialize) -> Result<Vec<u8>, ApiError> {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.send(&Method::GET, path, builder).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Deserialize a success body. An empty body decodes as JSON `null`.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Empty query string.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];
