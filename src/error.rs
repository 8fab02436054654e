//! Error Taxonomy
//!
//! Every failure a user action can hit is one `AppError` variant. None of them
//! are recovered locally: handlers convert them straight into an HTTP response
//! carrying a machine-readable `code` and a human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Status label reported by a timeout when no run status was ever observed.
pub const UNKNOWN_STATUS: &str = "unknown";

#[derive(Debug, Error)]
pub enum AppError {
    /// Writing an uploaded document to local storage failed.
    #[error("failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input rejected before any side effect took place.
    #[error("{0}")]
    Validation(String),

    /// The request body exceeded the configured upload limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The workflow engine did not accept the event.
    #[error("event dispatch failed: {0}")]
    Dispatch(String),

    /// The run-status endpoint answered with a failure.
    #[error("run status request failed: {0}")]
    Http(String),

    /// The run reached a failure terminal state.
    #[error("function run {status}")]
    RunFailed { status: String },

    /// No terminal status was observed before the poll ceiling.
    #[error("timed out waiting for run output (last status: {last_status})")]
    Timeout { last_status: String },
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Io,
    Validation,
    PayloadTooLarge,
    Dispatch,
    Http,
    RunFailed,
    Timeout,
}

/// JSON body returned to the page for any failed action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Io { .. } => ErrorCode::Io,
            AppError::Validation(_) => ErrorCode::Validation,
            AppError::PayloadTooLarge(_) => ErrorCode::PayloadTooLarge,
            AppError::Dispatch(_) => ErrorCode::Dispatch,
            AppError::Http(_) => ErrorCode::Http,
            AppError::RunFailed { .. } => ErrorCode::RunFailed,
            AppError::Timeout { .. } => ErrorCode::Timeout,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Dispatch(_) | AppError::Http(_) | AppError::RunFailed { .. } => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<&AppError> for ApiError {
    fn from(value: &AppError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
        (status, Json(ApiError::from(&self))).into_response()
    }
}
