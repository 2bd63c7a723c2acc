use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk encodings accepted for input and threshold files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// `.yaml` / `.yml` are YAML, everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                FileFormat::Yaml
            }
            _ => FileFormat::Json,
        }
    }
}

/// Parse already-loaded text in the given format.
pub fn parse_str<T: DeserializeOwned>(
    contents: &str,
    format: FileFormat,
) -> Result<T, Box<dyn std::error::Error>> {
    let value = match format {
        FileFormat::Json => serde_json::from_str(contents)?,
        FileFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(value)
}

/// Read a file's text along with the format implied by its extension.
pub fn read_text(path: &str) -> Result<(String, FileFormat), Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    tracing::debug!(path = %canonical.display(), bytes = contents.len(), "input file read");
    Ok((contents, FileFormat::from_path(&canonical)))
}

/// Read a JSON or YAML file and deserialise into a typed struct.
pub fn read_structured<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let (contents, format) = read_text(path)?;
    parse_str(&contents, format).map_err(|e| format!("Failed to parse '{}': {}", path, e).into())
}

/// Resolve and check the path points at a regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }
    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
