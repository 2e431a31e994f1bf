use clap::Args;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use kloan_core::session::{SessionHistory, SessionRecord};

/// Arguments for displaying a session-history file
#[derive(Args)]
pub struct HistoryArgs {
    /// Path to the session-history file (JSON lines)
    #[arg(long)]
    pub file: String,

    /// Maximum number of records to show
    #[arg(long, default_value = "10")]
    pub limit: usize,
}

/// Append one record to a JSON-lines history file, creating it if needed.
pub fn append_record(path: &str, record: &SessionRecord) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let line = serde_json::to_string(record)?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// Load a JSON-lines history file into the append-only log type.
pub fn load_history(path: &str) -> Result<SessionHistory, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(Path::new(path))
        .map_err(|e| format!("Failed to read '{path}': {e}"))?;

    let mut history = SessionHistory::new();
    for (i, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record: SessionRecord = serde_json::from_str(trimmed)
            .map_err(|e| format!("Malformed record on line {}: {e}", i + 1))?;
        history.append(record);
    }
    Ok(history)
}

pub fn run_history(args: HistoryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let history = load_history(&args.file)?;

    // Most recent first for display.
    let records: Vec<Value> = history
        .recent()
        .take(args.limit)
        .map(|r| {
            serde_json::json!({
                "timestamp": r.timestamp,
                "operation": r.operation,
                "verdict": r.verdict.get("result").cloned().unwrap_or(Value::Null),
            })
        })
        .collect();

    Ok(Value::Array(records))
}
