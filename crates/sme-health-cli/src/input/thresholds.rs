use sme_health_core::ThresholdTable;

use super::file::{self, FileFormat};

/// The built-in table, or the one at `path` after validation.
pub fn load_thresholds(path: Option<&str>) -> Result<ThresholdTable, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(ThresholdTable::default());
    };
    let (contents, format) = file::read_text(path)?;
    let table = parse_thresholds(&contents, format)
        .map_err(|e| format!("Threshold table '{path}': {e}"))?;
    tracing::info!(path, "using custom threshold table");
    Ok(table)
}

/// Parse and validate a threshold table from text.
pub fn parse_thresholds(
    contents: &str,
    format: FileFormat,
) -> Result<ThresholdTable, Box<dyn std::error::Error>> {
    let table: ThresholdTable = file::parse_str(contents, format)?;
    table.validate()?;
    Ok(table)
}
