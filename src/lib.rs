//! PDF RAG Console Library
//!
//! A thin web front end for a RAG workflow that runs inside an Inngest
//! engine. The crate never parses or embeds documents itself: it saves
//! uploads, emits events, and waits for the engine's function runs to report back.
//!
//! ## Modules
//! - **`storage`**: Saves uploaded PDFs to the local upload directory.
//! - **`events`**: Builds `rag/ingest_pdf` and `rag/query_pdf_ai` events and submits them.
//! - **`runs`**: Polls the engine's REST API until a query run produces its answer.
//! - **`ui`**: The axum router serving the page and its JSON endpoints.
//! - **`config`**: Defaults, TOML file and environment overrides.
//! - **`error`**: The error taxonomy and its HTTP mapping.

pub mod config;
pub mod error;
pub mod events;
pub mod runs;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod testing;
