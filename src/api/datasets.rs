//! Dataset browsing, comparison, download, and sky-map objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use skymap::object::CelestialObject;

use super::client::{NO_QUERY, api_path};
use super::types::{Extra, ListResponse, RecordId};
use super::{ApiClient, ApiError};

pub const DEFAULT_PREVIEW_LIMIT: u32 = 100;

/// Optional list filters. Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "objectType", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(rename = "coordinateSystem", skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
    #[serde(rename = "dateFrom", skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(rename = "dateTo", skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetPreview {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_a: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_b: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One selectable object type, such as `star` or `galaxy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    #[serde(alias = "type", alias = "value", alias = "id")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    #[serde(alias = "value", alias = "id")]
    pub name: String,
    #[serde(default, alias = "label", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `DELETE` and other acknowledgement-only calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Export format for [`ApiClient::download_dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadFormat {
    #[default]
    Csv,
    Json,
    Fits,
    VoTable,
}

impl DownloadFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Fits => "fits",
            Self::VoTable => "vot",
        }
    }
}

#[derive(Serialize)]
struct CompareRequest<'a> {
    dataset_a: &'a str,
    dataset_b: &'a str,
}

impl ApiClient {
    /// `GET /datasets`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn list_datasets(&self, filters: &DatasetFilters) -> Result<ListResponse<Dataset>, ApiError> {
        self.get_json("/datasets", filters).await
    }

    /// `GET /datasets/search?q=`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn search_datasets(&self, query: &str, filters: &DatasetFilters) -> Result<ListResponse<Dataset>, ApiError> {
        #[derive(Serialize)]
        struct Search<'a> {
            q: &'a str,
            #[serde(flatten)]
            filters: &'a DatasetFilters,
        }
        self.get_json("/datasets/search", &Search { q: query, filters }).await
    }

    /// `GET /datasets/{id}`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn get_dataset(&self, id: &str) -> Result<Dataset, ApiError> {
        self.get_json(&api_path(&["datasets", id]), &NO_QUERY).await
    }

    /// `GET /datasets/{id}/metadata`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn dataset_metadata(&self, id: &str) -> Result<DatasetMetadata, ApiError> {
        self.get_json(&api_path(&["datasets", id, "metadata"]), &NO_QUERY).await
    }

    /// `GET /datasets/{id}/preview?limit=`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn dataset_preview(&self, id: &str, limit: u32) -> Result<DatasetPreview, ApiError> {
        self.get_json(&api_path(&["datasets", id, "preview"]), &[("limit", limit)]).await
    }

    /// `GET /datasets/{id}/stats`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn dataset_stats(&self, id: &str) -> Result<DatasetStats, ApiError> {
        self.get_json(&api_path(&["datasets", id, "stats"]), &NO_QUERY).await
    }

    /// `GET /datasets/{id}/download?format=`, returning the raw bytes.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn download_dataset(&self, id: &str, format: DownloadFormat) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&api_path(&["datasets", id, "download"]), &[("format", format.as_str())]).await
    }

    /// `DELETE /datasets/{id}`. `None` when the server sends no body.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn delete_dataset(&self, id: &str) -> Result<Option<Ack>, ApiError> {
        self.delete_json(&api_path(&["datasets", id])).await
    }

    /// `GET /datasets/object-types`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn object_types(&self) -> Result<ListResponse<ObjectType>, ApiError> {
        self.get_json("/datasets/object-types", &NO_QUERY).await
    }

    /// `GET /datasets/coordinate-systems`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn coordinate_systems(&self) -> Result<ListResponse<CoordinateSystem>, ApiError> {
        self.get_json("/datasets/coordinate-systems", &NO_QUERY).await
    }

    /// `POST /datasets/compare`
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn compare_datasets(&self, dataset_a: &str, dataset_b: &str) -> Result<Comparison, ApiError> {
        self.post_json("/datasets/compare", &CompareRequest { dataset_a, dataset_b }).await
    }

    /// `GET /datasets/sky-objects`, decoded straight into sky-map objects.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request or decoding.
    pub async fn sky_objects(&self, filters: &DatasetFilters) -> Result<Vec<CelestialObject>, ApiError> {
        let list: ListResponse<CelestialObject> = self.get_json("/datasets/sky-objects", filters).await?;
        Ok(list.into_items())
    }
}
