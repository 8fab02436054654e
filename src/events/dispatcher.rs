use super::client::EventSender;
use super::types::*;
use crate::error::{AppError, AppResult};

use std::path::Path;
use std::sync::Arc;

/// Builds the two RAG events and submits them through a shared sender.
#[derive(Clone)]
pub struct EventDispatcher {
    sender: Arc<dyn EventSender>,
}

impl EventDispatcher {
    pub fn new(sender: Arc<dyn EventSender>) -> Self {
        Self { sender }
    }

    /// Announces a saved document. `path` should be the resolved absolute path.
    ///
    /// Nothing waits on the ingest run, so an empty acknowledgment is not an
    /// error here; the id is only returned for logging.
    pub async fn dispatch_ingest(&self, path: &Path) -> AppResult<Option<EventId>> {
        let source_id = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                AppError::Dispatch(format!("'{}' has no file name", path.display()))
            })?
            .to_string();

        let payload = IngestPayload {
            pdf_path: path.to_string_lossy().into_owned(),
            source_id,
        };
        let event = Event::new(INGEST_PDF_EVENT, &payload)?;
        let event_id = self.sender.send(vec![event]).await?.into_iter().next();

        match &event_id {
            Some(id) => tracing::info!(
                "Triggered ingestion for {} (event {})",
                payload.source_id,
                id
            ),
            None => tracing::warn!(
                "Ingestion for {} sent but no event id was acknowledged",
                payload.source_id
            ),
        }
        Ok(event_id)
    }

    /// Submits a question and returns the id used to poll for its answer.
    pub async fn dispatch_query(&self, question: &str, top_k: TopK) -> AppResult<EventId> {
        let payload = QueryPayload {
            question: question.to_string(),
            top_k: top_k.get(),
        };
        let event = Event::new(QUERY_PDF_EVENT, &payload)?;
        let event_id = self
            .sender
            .send(vec![event])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::Dispatch(format!("engine acknowledged no events for {}", QUERY_PDF_EVENT))
            })?;

        tracing::info!("Query submitted (event {}, top_k={})", event_id, top_k.get());
        Ok(event_id)
    }
}
