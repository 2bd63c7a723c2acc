use serde_json::Value;
use std::io::{self, Read};

use sme_health_core::AnalysisInput;

use super::file::{self, FileFormat};

/// Read an analysis document or a bare snapshot piped on stdin.
/// Returns None when stdin is a TTY or the pipe is empty.
pub fn read_stdin() -> Result<Option<AnalysisInput>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

/// JSON when the text opens an object or array, YAML otherwise.
fn sniff_format(text: &str) -> FileFormat {
    match text.chars().next() {
        Some('{') | Some('[') => FileFormat::Json,
        _ => FileFormat::Yaml,
    }
}

/// A piped document carries a `current` key; anything else is read as the
/// current-year snapshot on its own.
pub fn parse_piped(text: &str) -> Result<Option<AnalysisInput>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let format = sniff_format(trimmed);
    let value: Value = file::parse_str(trimmed, format)
        .map_err(|e| format!("Failed to parse {format:?} from stdin: {e}"))?;
    tracing::debug!(bytes = trimmed.len(), ?format, "input read from stdin");

    let input = if value.get("current").is_some() {
        serde_json::from_value(value)?
    } else {
        AnalysisInput {
            current: serde_json::from_value(value)?,
            previous: None,
            compliance_flags: None,
        }
    };
    Ok(Some(input))
}
