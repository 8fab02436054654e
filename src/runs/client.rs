use super::types::{Run, RunsResponse};
use crate::error::{AppError, AppResult};
use crate::events::types::EventId;

use async_trait::async_trait;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of the runs started for an event.
#[async_trait]
pub trait RunSource: Send + Sync {
    async fn fetch_runs(&self, event_id: &EventId) -> AppResult<Vec<Run>>;
}

/// Reads runs from the engine's REST API.
pub struct HttpRunSource {
    http_client: reqwest::Client,
    api_base: String,
}

impl HttpRunSource {
    pub fn new(http_client: reqwest::Client, api_base: &str) -> Self {
        Self {
            http_client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn runs_url(&self, event_id: &EventId) -> String {
        format!(
            "{}/events/{}/runs",
            self.api_base,
            urlencoding::encode(event_id.as_str())
        )
    }
}

#[async_trait]
impl RunSource for HttpRunSource {
    async fn fetch_runs(&self, event_id: &EventId) -> AppResult<Vec<Run>> {
        let url = self.runs_url(event_id);

        let resp = self
            .http_client
            .get(&url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Http(format!("GET {} returned {}", url, status)));
        }

        let body: RunsResponse = resp
            .json()
            .await
            .map_err(|e| AppError::Http(format!("invalid runs response: {}", e)))?;

        Ok(body.data)
    }
}
