//! Event Dispatch Module
//!
//! Hands "document ready" and "question asked" messages to the external
//! workflow engine. The engine runs the actual RAG functions; this crate only
//! names the event, shapes its payload and records the id it gets back.
//!
//! ## Submodules
//! - **`types`**: Event names, payloads, the `EventId` correlation key and the bounded `TopK`.
//! - **`client`**: The `EventSender` seam and its HTTP implementation for the Inngest event API.
//! - **`dispatcher`**: Builds ingest and query events and submits them through a sender.

pub mod client;
pub mod dispatcher;
pub mod types;
