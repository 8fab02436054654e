//! Run Polling Module
//!
//! After a query event is accepted the engine starts a function run for it.
//! This module watches that run through the engine's REST API until it
//! finishes, fails, or the wait ceiling is reached.
//!
//! ## Polling Model
//! 1. **Fetch**: `GET {api_base}/events/{event_id}/runs`. Any HTTP failure aborts the wait.
//! 2. **Classify**: only the first run is inspected. Its status is success-terminal,
//!    failure-terminal, or still in progress.
//! 3. **Wait**: in-progress runs are re-polled at a fixed interval until the timeout.
//!
//! ## Submodules
//! - **`types`**: Run records, status classification and the answer extracted from a run's output.
//! - **`client`**: The `RunSource` seam and its HTTP implementation.
//! - **`poller`**: The timed wait loop.

pub mod client;
pub mod poller;
pub mod types;
