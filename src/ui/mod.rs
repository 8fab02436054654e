//! Presentation Layer
//!
//! Serves the single-page console and the two JSON endpoints it calls.
//!
//! ## Routes
//! - `GET /`: the page (upload panel, query panel, answer and sources).
//! - `POST /api/upload`: multipart upload, saved then announced with an ingest event.
//! - `POST /api/query`: question + `top_k`, dispatched then polled until the run answers.
//! - `GET /healthz`: liveness.
//!
//! Each request runs to completion before responding; the page shows a
//! spinner for the duration.

pub mod handlers;
pub mod types;


pub use handlers::{build_router, AppState};
