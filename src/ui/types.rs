use crate::error::{AppError, AppResult};
use crate::events::types::TopK;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Absolute path the document was written to.
    pub path: String,
    pub source_id: String,
    pub event_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    pub top_k: Option<i64>,
}

impl QueryRequest {
    /// Returns the trimmed question and bounded `top_k`, or why the form is invalid.
    pub fn validate(&self) -> AppResult<(String, TopK)> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(AppError::Validation("question cannot be blank".into()));
        }
        let top_k = match self.top_k {
            Some(value) => TopK::new(value)?,
            None => TopK::default(),
        };
        Ok((question.to_string(), top_k))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub event_id: String,
    pub answer: String,
    pub sources: Vec<String>,
}
