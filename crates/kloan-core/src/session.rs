use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One evaluator interaction: what went in, what came out, when. The engine
/// never reads these back; they exist for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    /// Which operation produced the verdict ("evaluate", "max-loan", ...).
    pub operation: String,
    pub inputs: serde_json::Value,
    pub verdict: serde_json::Value,
}

impl SessionRecord {
    pub fn now(operation: &str, inputs: serde_json::Value, verdict: serde_json::Value) -> Self {
        SessionRecord {
            timestamp: Utc::now(),
            operation: operation.to_string(),
            inputs,
            verdict,
        }
    }
}

/// Append-only log of a session's evaluations, owned by the caller. The
/// display convention is most-recent-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionHistory {
    records: Vec<SessionRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        SessionHistory::default()
    }

    pub fn append(&mut self, record: SessionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display order, most recent first.
    pub fn recent(&self) -> impl Iterator<Item = &SessionRecord> {
        self.records.iter().rev()
    }
}
