//! NDJSON output: one JSON object per line on stdout.

use std::io::{self, Write};

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes to stdout.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_event() {
        let mut buf = Vec::new();
        write_event(&mut buf, &serde_json::json!({"event": "get", "value": "5"})).unwrap();
        write_event(&mut buf, &serde_json::json!({"event": "done"})).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "{\"event\":\"get\",\"value\":\"5\"}\n{\"event\":\"done\"}\n");
    }
}
