//! AI discovery: analysis jobs, insights, and free-form questions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{NO_QUERY, api_path};
use super::types::{Extra, ListResponse, RecordId};
use super::{ApiClient, ApiError};

pub const DEFAULT_ANALYSIS_TYPE: &str = "full";
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub dataset_ids: Vec<String>,
    pub analysis_type: String,
}

impl AnalysisRequest {
    #[must_use]
    pub fn full(dataset_ids: Vec<String>) -> Self {
        Self { dataset_ids, analysis_type: DEFAULT_ANALYSIS_TYPE.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisJob {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub job_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Percent complete, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One AI-generated finding about a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "text", alias = "description")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Output of a finished analysis job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub job_id: Option<RecordId>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One flagged record or pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default, alias = "id", alias = "index", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<RecordId>,
    #[serde(default, alias = "anomaly_score", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, alias = "reason", alias = "summary", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Result of anomaly, outlier, and pattern detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default, alias = "anomalies", alias = "outliers", alias = "patterns")]
    pub findings: Vec<Finding>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "text", alias = "description")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize)]
struct ColumnsRequest<'a> {
    columns: &'a [String],
}

#[derive(Serialize)]
struct DatasetIdsRequest<'a> {
    dataset_ids: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskRequest {
    pub question: String,
    pub context: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ApiClient {
    /// `POST /ai/analyze`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn run_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisJob, ApiError> {
        self.post_json("/ai/analyze", request).await
    }

    /// `GET /ai/status/{job}`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn analysis_status(&self, job_id: &str) -> Result<AnalysisJob, ApiError> {
        self.get_json(&api_path(&["ai", "status", job_id]), &NO_QUERY).await
    }

    /// `GET /ai/results/{job}`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn analysis_results(&self, job_id: &str) -> Result<AnalysisResults, ApiError> {
        self.get_json(&api_path(&["ai", "results", job_id]), &NO_QUERY).await
    }

    /// `POST /ai/anomalies/{id}`. `params` defaults to an empty object.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn detect_anomalies(&self, dataset_id: &str, params: Option<Value>) -> Result<Detection, ApiError> {
        let params = params.unwrap_or_else(|| Value::Object(Extra::new()));
        self.post_json(&api_path(&["ai", "anomalies", dataset_id]), &params).await
    }

    /// `POST /ai/outliers/{id}` over the given columns.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn find_outliers(&self, dataset_id: &str, columns: &[String]) -> Result<Detection, ApiError> {
        self.post_json(&api_path(&["ai", "outliers", dataset_id]), &ColumnsRequest { columns }).await
    }

    /// `POST /ai/patterns`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn discover_patterns(&self, dataset_ids: &[String]) -> Result<Detection, ApiError> {
        self.post_json("/ai/patterns", &DatasetIdsRequest { dataset_ids }).await
    }

    /// `GET /ai/insights/{id}`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn ai_insights(&self, dataset_id: &str) -> Result<Insights, ApiError> {
        self.get_json(&api_path(&["ai", "insights", dataset_id]), &NO_QUERY).await
    }

    /// `POST /ai/ask`. `context` defaults to an empty object.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn ask(&self, question: &str, context: Option<Value>) -> Result<Answer, ApiError> {
        let request = AskRequest {
            question: question.to_owned(),
            context: context.unwrap_or_else(|| Value::Object(Extra::new())),
        };
        self.post_json("/ai/ask", &request).await
    }

    /// `GET /ai/recommendations`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn recommendations(&self) -> Result<ListResponse<Recommendation>, ApiError> {
        self.get_json("/ai/recommendations", &NO_QUERY).await
    }

    /// `GET /ai/history?limit=`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn analysis_history(&self, limit: u32) -> Result<ListResponse<AnalysisJob>, ApiError> {
        self.get_json("/ai/history", &[("limit", limit)]).await
    }
}
