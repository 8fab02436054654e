use super::types::{QueryRequest, QueryResponse, UploadResponse};
use crate::error::{AppError, AppResult};
use crate::events::dispatcher::EventDispatcher;
use crate::runs::poller::RunPoller;
use crate::runs::types::QueryAnswer;
use crate::storage::sink::FileSink;
use crate::storage::types::UploadedDocument;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

/// Name of the multipart field carrying the PDF.
pub const UPLOAD_FIELD: &str = "file";

/// Process-wide collaborators, built once in `main` and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub sink: Arc<FileSink>,
    pub dispatcher: EventDispatcher,
    pub poller: Arc<RunPoller>,
}

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(ui))
        .route("/healthz", get(healthz))
        .route("/api/upload", post(api_upload))
        .route("/api/query", post(api_query))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn ui() -> Html<&'static str> {
    Html(include_str!("page.html"))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn api_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let multipart = multipart
        .map_err(|e| AppError::Validation(format!("invalid upload: {}", e.body_text())))?;
    let document = read_upload(multipart).await?;

    let path = state.sink.save_document(document).await?;
    let event_id = state.dispatcher.dispatch_ingest(&path).await?;

    let source_id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Json(UploadResponse {
        path: path.to_string_lossy().into_owned(),
        source_id,
        event_id: event_id.map(|id| id.0),
    }))
}

async fn read_upload(mut multipart: Multipart) -> AppResult<UploadedDocument> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("upload is missing a filename".into()))?;
        let bytes = field.bytes().await.map_err(upload_error)?;

        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".into()));
        }
        return Ok(UploadedDocument::new(filename, bytes));
    }

    Err(AppError::Validation(format!(
        "multipart field '{}' is required",
        UPLOAD_FIELD
    )))
}

fn upload_error(e: MultipartError) -> AppError {
    let message = format!("invalid upload: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

async fn api_query(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> AppResult<Json<QueryResponse>> {
    let Json(req) =
        body.map_err(|e| AppError::Validation(format!("invalid query: {}", e.body_text())))?;
    let (question, top_k) = req.validate()?;

    let event_id = state.dispatcher.dispatch_query(&question, top_k).await?;
    let output = state.poller.wait_for_output(&event_id).await?;
    let QueryAnswer { answer, sources } = QueryAnswer::from_output(&output);

    Ok(Json(QueryResponse {
        event_id: event_id.0,
        answer,
        sources,
    }))
}
