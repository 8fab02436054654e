//! Run Poller
//!
//! Waits for the first run of an event to reach a terminal status. The loop
//! sleeps a fixed interval between polls and has no backoff; it stops on the
//! first terminal status or once the timeout has elapsed.

use super::client::RunSource;
use super::types::{RunOutput, RunPhase};
use crate::error::{AppError, AppResult, UNKNOWN_STATUS};
use crate::events::types::EventId;

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub struct RunPoller {
    source: Arc<dyn RunSource>,
    timeout: Duration,
    poll_interval: Duration,
}

impl RunPoller {
    pub fn with_timing(
        source: Arc<dyn RunSource>,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            timeout,
            poll_interval,
        }
    }

    /// Polls until the event's first run succeeds and returns its output.
    ///
    /// # Errors
    /// * `AppError::Http` as soon as a fetch fails.
    /// * `AppError::RunFailed` when the run is `Failed` or `Cancelled`.
    /// * `AppError::Timeout` when no terminal status appeared in time, carrying
    ///   the last status seen (or `"unknown"`).
    pub async fn wait_for_output(&self, event_id: &EventId) -> AppResult<RunOutput> {
        let start = Instant::now();
        let mut last_status: Option<String> = None;
        let mut polls = 0u32;

        loop {
            let runs = self.source.fetch_runs(event_id).await?;
            polls += 1;

            if let Some(run) = runs.first() {
                if let Some(status) = run.status.as_deref().filter(|s| !s.is_empty()) {
                    if last_status.as_deref() != Some(status) {
                        tracing::debug!("Run for event {} is {}", event_id, status);
                    }
                    last_status = Some(status.to_string());
                }

                match run.phase() {
                    RunPhase::Succeeded => {
                        tracing::info!(
                            "Run for event {} finished after {} poll(s)",
                            event_id,
                            polls
                        );
                        return Ok(run.output_map());
                    }
                    RunPhase::Failed => {
                        let status = last_status.unwrap_or_else(|| UNKNOWN_STATUS.to_string());
                        return Err(AppError::RunFailed { status });
                    }
                    RunPhase::InProgress => {}
                }
            }

            if start.elapsed() > self.timeout {
                return Err(AppError::Timeout {
                    last_status: last_status.unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
