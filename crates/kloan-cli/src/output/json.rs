use serde_json::Value;

/// Default output: pretty-printed JSON with full decimal precision.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to render JSON output: {e}"),
    }
}
