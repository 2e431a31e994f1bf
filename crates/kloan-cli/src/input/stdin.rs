use serde_json::Value;
use std::io::{self, Read};

/// Read piped JSON from stdin, if any. On a TTY (nothing piped) this yields
/// `None` so the caller can fall back to flags or report the missing input.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|e| format!("Piped input is not valid JSON: {e}"))?;
    Ok(Some(value))
}
