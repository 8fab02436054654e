use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const INGEST_PDF_EVENT: &str = "rag/ingest_pdf";
pub const QUERY_PDF_EVENT: &str = "rag/query_pdf_ai";

/// Identifier the engine assigns to an accepted event.
///
/// Opaque; only used as the correlation key when polling for runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Number of chunks the query function should retrieve, bounded to `1..=20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopK(u32);

impl TopK {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;
    pub const DEFAULT: u32 = 5;

    pub fn new(value: i64) -> AppResult<Self> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(AppError::Validation(format!(
                "top_k must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for TopK {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Payload of `rag/ingest_pdf`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestPayload {
    pub pdf_path: String,
    pub source_id: String,
}

/// Payload of `rag/query_pdf_ai`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryPayload {
    pub question: String,
    pub top_k: u32,
}

/// One event as submitted to the engine's event API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub data: serde_json::Value,
    /// De-duplication key. A retried send with the same id is accepted once.
    pub id: String,
    /// Unix timestamp in milliseconds.
    pub ts: u64,
}

impl Event {
    pub fn new<T: Serialize>(name: &str, data: &T) -> AppResult<Self> {
        let data = serde_json::to_value(data)
            .map_err(|e| AppError::Dispatch(format!("failed to encode {} payload: {}", name, e)))?;
        Ok(Self {
            name: name.to_string(),
            data,
            id: uuid::Uuid::new_v4().to_string(),
            ts: now_ms(),
        })
    }
}

/// Body returned by `POST /e/{key}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendEventsResponse {
    pub ids: Vec<String>,
    pub error: Option<String>,
}

pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
