//! Event Submission Client
//!
//! `EventSender` is the seam between the dispatcher and the engine. The HTTP
//! implementation posts a batch of events to `{event_api_base}/e/{event_key}`
//! and returns the ids the engine acknowledged, in submission order.

use super::types::{Event, EventId, SendEventsResponse};
use crate::error::{AppError, AppResult};

use async_trait::async_trait;
use std::time::Duration;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait EventSender: Send + Sync {
    /// Submits `events` and returns the acknowledged ids. The list may be empty.
    async fn send(&self, events: Vec<Event>) -> AppResult<Vec<EventId>>;
}

pub struct InngestClient {
    http_client: reqwest::Client,
    event_url: String,
}

impl InngestClient {
    pub fn new(http_client: reqwest::Client, event_api_base: &str, event_key: &str) -> Self {
        let event_url = format!(
            "{}/e/{}",
            event_api_base.trim_end_matches('/'),
            urlencoding::encode(event_key)
        );
        Self {
            http_client,
            event_url,
        }
    }
}

#[async_trait]
impl EventSender for InngestClient {
    async fn send(&self, events: Vec<Event>) -> AppResult<Vec<EventId>> {
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        tracing::debug!("Sending {} event(s): {:?}", events.len(), names);

        let resp = self
            .http_client
            .post(&self.event_url)
            .json(&events)
            .timeout(SEND_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Dispatch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Dispatch(format!(
                "event API returned {}: {}",
                status,
                body.trim()
            )));
        }

        let body: SendEventsResponse = resp
            .json()
            .await
            .map_err(|e| AppError::Dispatch(format!("invalid event API response: {}", e)))?;

        if let Some(error) = body.error.filter(|e| !e.is_empty()) {
            return Err(AppError::Dispatch(error));
        }

        Ok(body.ids.into_iter().map(EventId).collect())
    }
}
