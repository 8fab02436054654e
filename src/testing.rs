//! Test doubles shared by the module test suites.

use crate::error::{AppError, AppResult};
use crate::events::client::EventSender;
use crate::events::types::{Event, EventId};
use crate::runs::client::RunSource;
use crate::runs::types::Run;

use async_trait::async_trait;
use axum::Router;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Records every submitted event and acknowledges it with a fixed id list.
pub struct RecordingSender {
    pub sent: Mutex<Vec<Event>>,
    ack: Vec<String>,
    fail_with: Option<String>,
}

impl RecordingSender {
    pub fn acking(ids: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            ack: ids.iter().map(|s| s.to_string()).collect(),
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            ack: Vec::new(),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<Event> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSender for RecordingSender {
    async fn send(&self, events: Vec<Event>) -> AppResult<Vec<EventId>> {
        self.sent.lock().unwrap().extend(events);
        match &self.fail_with {
            Some(message) => Err(AppError::Dispatch(message.clone())),
            None => Ok(self.ack.iter().map(|id| EventId(id.clone())).collect()),
        }
    }
}

/// Replays a script of poll responses; the last entry repeats forever.
pub struct ScriptedRunSource {
    script: Mutex<VecDeque<AppResult<Vec<Run>>>>,
    last: Mutex<Vec<Run>>,
    calls: AtomicUsize,
}

impl ScriptedRunSource {
    pub fn new(script: Vec<AppResult<Vec<Run>>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RunSource for ScriptedRunSource {
    async fn fetch_runs(&self, _event_id: &EventId) -> AppResult<Vec<Run>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(runs)) => {
                *self.last.lock().unwrap() = runs.clone();
                Ok(runs)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last.lock().unwrap().clone()),
        }
    }
}

pub fn run(status: &str) -> Run {
    Run {
        status: Some(status.to_string()),
        output: None,
    }
}

pub fn run_with_output(status: &str, output: serde_json::Value) -> Run {
    Run {
        status: Some(status.to_string()),
        output: Some(output),
    }
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_mock(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
