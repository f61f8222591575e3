//! File upload and ingestion job tracking.

use std::path::Path;

use futures::stream::{self, StreamExt};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{NO_QUERY, api_path, decode};
use super::types::{Extra, ListResponse, RecordId};
use super::{ApiClient, ApiError};

/// Bytes handed to the transport between progress reports.
pub const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// Lifecycle of an ingestion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStatus {
    #[default]
    Pending,
    Uploading,
    Normalizing,
    Validating,
    Storing,
    Completed,
    Failed,
    /// Any status this client does not know.
    #[serde(other)]
    Unknown,
}

impl IngestionStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Badge colour for the status.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Pending | Self::Unknown => "#6B7280",
            Self::Uploading => "#3B82F6",
            Self::Normalizing => "#8B5CF6",
            Self::Validating => "#F59E0B",
            Self::Storing => "#10B981",
            Self::Completed => "#22C55E",
            Self::Failed => "#EF4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionJob {
    #[serde(alias = "id")]
    pub job_id: RecordId,
    #[serde(default)]
    pub status: IngestionStatus,
    /// Percent complete, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFormat {
    pub extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// How an uploaded file will look once normalized, before it is confirmed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationPreview {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default, alias = "sample", alias = "preview")]
    pub rows: Vec<Value>,
    /// Source column to normalized field, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Filters for the ingestion history listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Percent of `total` covered by `sent`, rounded to the nearest integer.
#[must_use]
pub fn upload_percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (sent.min(total) * 100 + total / 2) / total;
    u8::try_from(pct).unwrap_or(100)
}

/// MIME type guessed from the file extension.
#[must_use]
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("fits" | "fit") => "application/fits",
        Some("vot" | "xml") => "application/x-votable+xml",
        _ => "application/octet-stream",
    }
}

impl ApiClient {
    /// `POST /ingestion/upload` as multipart `file` + `source`.
    ///
    /// `on_progress` receives the percentage of the file handed to the
    /// transport, once per chunk, ending at 100. An empty file reports 100
    /// once.
    ///
    /// # Errors
    ///
    /// [`ApiError::Io`] if the file cannot be read; otherwise any
    /// [`ApiError`] from the request or decoding.
    pub async fn upload_file<F>(&self, path: &Path, source: &str, on_progress: F) -> Result<IngestionJob, ApiError>
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        let contents = tokio::fs::read(path).await?;
        let file_name = path.file_name().map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        let total = contents.len() as u64;
        tracing::info!(file = %file_name, bytes = total, source, "uploading dataset");

        if total == 0 {
            on_progress(100);
        }
        let chunks: Vec<Vec<u8>> = contents.chunks(UPLOAD_CHUNK_BYTES).map(<[u8]>::to_vec).collect();
        let mut sent = 0_u64;
        let body = stream::iter(chunks).map(move |chunk| {
            sent += chunk.len() as u64;
            on_progress(upload_percent(sent, total));
            Ok::<_, std::io::Error>(chunk)
        });

        let part = Part::stream_with_length(reqwest::Body::wrap_stream(body), total)
            .file_name(file_name)
            .mime_str(mime_for(path))?;
        let form = Form::new().part("file", part).text("source", source.to_owned());

        let builder = self.request(Method::POST, "/ingestion/upload").multipart(form);
        let response = self.send(&Method::POST, "/ingestion/upload", builder).await?;
        decode(response).await
    }

    /// `GET /ingestion/status/{job}`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn ingestion_status(&self, job_id: &str) -> Result<IngestionJob, ApiError> {
        self.get_json(&api_path(&["ingestion", "status", job_id]), &NO_QUERY).await
    }

    /// `GET /ingestion/history`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn ingestion_history(&self, query: &HistoryQuery) -> Result<ListResponse<IngestionJob>, ApiError> {
        self.get_json("/ingestion/history", query).await
    }

    /// `GET /ingestion/preview/{file}`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn preview_normalization(&self, file_id: &str) -> Result<NormalizationPreview, ApiError> {
        self.get_json(&api_path(&["ingestion", "preview", file_id]), &NO_QUERY).await
    }

    /// `POST /ingestion/confirm/{job}`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn confirm_ingestion(&self, job_id: &str) -> Result<IngestionJob, ApiError> {
        self.post_empty(&api_path(&["ingestion", "confirm", job_id])).await
    }

    /// `DELETE /ingestion/cancel/{job}`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn cancel_ingestion(&self, job_id: &str) -> Result<IngestionJob, ApiError> {
        self.delete_json(&api_path(&["ingestion", "cancel", job_id])).await
    }

    /// `GET /ingestion/sources`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn data_sources(&self) -> Result<ListResponse<DataSource>, ApiError> {
        self.get_json("/ingestion/sources", &NO_QUERY).await
    }

    /// `GET /ingestion/formats`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn supported_formats(&self) -> Result<ListResponse<FileFormat>, ApiError> {
        self.get_json("/ingestion/formats", &NO_QUERY).await
    }
}
