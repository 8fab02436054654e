use serde::{Deserialize, Serialize};

/// Statuses after which a run has produced its output.
pub const SUCCESS_STATUSES: &[&str] = &["Completed", "Succeeded", "Success", "Finished"];

/// Statuses after which a run will never produce output.
pub const FAILURE_STATUSES: &[&str] = &["Failed", "Cancelled"];

/// Output object of a finished run.
pub type RunOutput = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Succeeded,
    Failed,
    /// Anything else, including statuses this crate has never seen.
    InProgress,
}

impl RunPhase {
    pub fn classify(status: &str) -> Self {
        if SUCCESS_STATUSES.contains(&status) {
            RunPhase::Succeeded
        } else if FAILURE_STATUSES.contains(&status) {
            RunPhase::Failed
        } else {
            RunPhase::InProgress
        }
    }
}

/// One function run as reported by the engine. Unlisted fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    pub status: Option<String>,
    pub output: Option<serde_json::Value>,
}

impl Run {
    pub fn phase(&self) -> RunPhase {
        self.status
            .as_deref()
            .map(RunPhase::classify)
            .unwrap_or(RunPhase::InProgress)
    }

    /// The output as an object; absent, null or non-object output is empty.
    pub fn output_map(&self) -> RunOutput {
        match &self.output {
            Some(serde_json::Value::Object(map)) => map.clone(),
            Some(serde_json::Value::Null) | None => RunOutput::new(),
            Some(other) => {
                tracing::warn!("Run output is not an object, ignoring: {}", other);
                RunOutput::new()
            }
        }
    }
}

/// Body of `GET /events/{id}/runs`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunsResponse {
    pub data: Vec<Run>,
}

/// Answer text and cited sources pulled out of a run's output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Vec<String>,
}

impl QueryAnswer {
    pub fn from_output(output: &RunOutput) -> Self {
        let answer = match output.get("answer") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let sources = output
            .get("sources")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { answer, sources }
    }
}
