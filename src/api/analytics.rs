//! Aggregate analytics: summary, per-dataset statistics, distributions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{NO_QUERY, api_path};
use super::types::{Extra, ListResponse};
use super::{ApiClient, ApiError};

pub const DEFAULT_METRICS_RANGE: &str = "7d";

/// Time windows the metrics endpoint accepts.
pub const TIME_RANGES: [(&str, &str); 5] = [
    ("24h", "Last 24 Hours"),
    ("7d", "Last 7 Days"),
    ("30d", "Last 30 Days"),
    ("90d", "Last 90 Days"),
    ("all", "All Time"),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_datasets: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_objects: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sources: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_magnitude: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Object count for one data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCount {
    #[serde(alias = "source")]
    pub name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestionMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingested: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Histogram of one column's values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueDistribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, alias = "histogram", alias = "distribution")]
    pub bins: Vec<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Query for [`ApiClient::trends`]. Unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrendQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(default, alias = "date", alias = "period", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, alias = "count", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trends {
    #[serde(default, alias = "trends", alias = "data")]
    pub points: Vec<TrendPoint>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Pairwise correlation of the requested columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    #[serde(default)]
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` square. Missing cells are `None`.
    #[serde(default)]
    pub matrix: Vec<Vec<Option<f64>>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Correlation {
    /// Coefficient between two named columns.
    #[must_use]
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        *self.matrix.get(i)?.get(j)?
    }
}

/// Query for [`ApiClient::heatmap`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeatmapQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    #[serde(default, alias = "data", alias = "bins")]
    pub cells: Vec<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_normalized: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_duration_ms: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// File format for [`ApiClient::export_analytics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Pdf,
    Csv,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct ColumnsRequest<'a> {
    columns: &'a [String],
}

impl IngestionMetrics {
    /// Fraction of ingestions that succeeded, when both counts are known.
    #[must_use]
    pub fn success_rate(&self) -> Option<f64> {
        let ok = self.ingested?;
        let failed = self.failed?;
        let total = ok + failed;
        #[allow(clippy::cast_precision_loss)]
        (total > 0).then(|| ok as f64 / total as f64)
    }
}

impl ApiClient {
    /// `GET /analytics/summary`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn analytics_summary(&self) -> Result<AnalyticsSummary, ApiError> {
        self.get_json("/analytics/summary", &NO_QUERY).await
    }

    /// `GET /analytics/statistics/{id}`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn dataset_statistics(&self, dataset_id: &str) -> Result<DatasetStatistics, ApiError> {
        self.get_json(&api_path(&["analytics", "statistics", dataset_id]), &NO_QUERY).await
    }

    /// `GET /analytics/source-distribution`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn source_distribution(&self) -> Result<ListResponse<SourceCount>, ApiError> {
        self.get_json("/analytics/source-distribution", &NO_QUERY).await
    }

    /// `GET /analytics/ingestion-metrics?range=`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn ingestion_metrics(&self, range: &str) -> Result<IngestionMetrics, ApiError> {
        self.get_json("/analytics/ingestion-metrics", &[("range", range)]).await
    }

    /// `GET /analytics/distribution/{id}?column=`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn value_distribution(&self, dataset_id: &str, column: &str) -> Result<ValueDistribution, ApiError> {
        self.get_json(&api_path(&["analytics", "distribution", dataset_id]), &[("column", column)]).await
    }

    /// `GET /analytics/trends`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn trends(&self, query: &TrendQuery) -> Result<Trends, ApiError> {
        self.get_json("/analytics/trends", query).await
    }

    /// `POST /analytics/correlation/{id}` with the columns to correlate.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn correlation(&self, dataset_id: &str, columns: &[String]) -> Result<Correlation, ApiError> {
        self.post_json(&api_path(&["analytics", "correlation", dataset_id]), &ColumnsRequest { columns }).await
    }

    /// `GET /analytics/heatmap`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn heatmap(&self, query: &HeatmapQuery) -> Result<Heatmap, ApiError> {
        self.get_json("/analytics/heatmap", query).await
    }

    /// `GET /analytics/normalization-metrics`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn normalization_metrics(&self) -> Result<NormalizationMetrics, ApiError> {
        self.get_json("/analytics/normalization-metrics", &NO_QUERY).await
    }

    /// `GET /analytics/export?format=`, returning the report file's bytes.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn export_analytics(&self, format: ReportFormat) -> Result<Vec<u8>, ApiError> {
        tracing::info!(format = format.as_str(), "exporting analytics report");
        self.get_bytes("/analytics/export", &[("format", format.as_str())]).await
    }
}
