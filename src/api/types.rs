//! Wire types shared by every endpoint group.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields the typed record does not name. Kept, never dropped.
pub type Extra = Map<String, Value>;

/// Record identifier. The backend uses both UUID strings and integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

/// A list endpoint's body: either a bare array or an envelope object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Page {
        #[serde(
            alias = "datasets",
            alias = "jobs",
            alias = "objects",
            alias = "results",
            alias = "data",
            alias = "history",
            alias = "recommendations"
        )]
        items: Vec<T>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total: Option<u64>,
        #[serde(flatten)]
        extra: Extra,
    },
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Bare(items) | Self::Page { items, .. } => items,
        }
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Page { items, .. } => items,
        }
    }

    /// Server-reported total, else the number of items received.
    #[must_use]
    pub fn total(&self) -> u64 {
        match self {
            Self::Bare(items) => items.len() as u64,
            Self::Page { items, total, .. } => total.unwrap_or(items.len() as u64),
        }
    }
}

/// Error body returned with a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// A string, or a list of validation problems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ServerErrorBody {
    /// Parse an error body, tolerating empty and non-JSON bodies.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Self>(raw) {
            Ok(body) => Some(body),
            Err(_) => Some(Self { message: Some(raw.trim().to_owned()), ..Self::default() }),
        }
    }

    /// `detail` as display text. Validation lists are joined by `"; "`.
    #[must_use]
    pub fn detail_text(&self) -> Option<String> {
        let text = match self.detail.as_ref()? {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            Value::Array(items) => items.iter().map(detail_item).collect::<Vec<_>>().join("; "),
            other => other.to_string(),
        };
        (!text.trim().is_empty()).then_some(text)
    }
}

fn detail_item(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Object(obj) => obj.get("msg").and_then(Value::as_str).map_or_else(|| item.to_string(), str::to_owned),
        other => other.to_string(),
    }
}
