//! Reading JSON documents from disk

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ArchiveError, Result};

/// Which document is being read, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Schema,
    Data,
}

impl DocumentRole {
    fn label(&self) -> &'static str {
        match self {
            DocumentRole::Schema => "Schema",
            DocumentRole::Data => "Data",
        }
    }
}

/// Load and parse a JSON file.
///
/// A missing file is `ResourceMissing`; text that is not JSON is `MalformedInput`.
pub fn load_json(path: impl AsRef<Path>, role: DocumentRole) -> Result<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ArchiveError::ResourceMissing {
            what: role.label(),
            path: path.to_path_buf(),
        },
        _ => ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let value = serde_json::from_str(&text).map_err(|source| ArchiveError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), role = role.label(), bytes = text.len(), "loaded document");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json(dir.path().join("absent.json"), DocumentRole::Schema).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ResourceMissing);
        assert!(err.to_string().starts_with("Schema file not found"));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ \"videos\": [ }").unwrap();
        let err = load_json(&path, DocumentRole::Data).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedInput);
    }

    #[test]
    fn test_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{ "videos": [] }"#).unwrap();
        let value = load_json(&path, DocumentRole::Data).unwrap();
        assert!(value["videos"].as_array().unwrap().is_empty());
    }
}
