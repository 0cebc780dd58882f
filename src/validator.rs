//! Schema conformance checking
//!
//! Wraps a compiled JSON Schema and reports the first violation found by the
//! validator's traversal, together with the instance path leading to it.

use std::fmt;

use jsonschema::paths::PathChunk;
use jsonschema::JSONSchema;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ArchiveError, Result};

/// One step from the document root towards an offending node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "'{}'", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// The first schema violation in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub message: String,
    /// Empty when the violation is at the root
    pub path: Vec<PathSegment>,
}

impl ValidationFailure {
    /// Python-style rendering of the path, e.g. `['videos', 0, 'match']`
    pub fn location(&self) -> String {
        let segments: Vec<String> = self.path.iter().map(ToString::to_string).collect();
        format!("[{}]", segments.join(", "))
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.location())
    }
}

/// Proof that a document passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conformance;

/// Compiled archive schema
pub struct SchemaValidator {
    compiled: JSONSchema,
}

impl SchemaValidator {
    /// Compile a schema document
    pub fn new(schema: &Value) -> Result<Self> {
        let compiled = JSONSchema::compile(schema)
            .map_err(|e| ArchiveError::InvalidSchema(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// Check a document, stopping at the first violation
    pub fn validate(&self, document: &Value) -> std::result::Result<Conformance, ValidationFailure> {
        let mut errors = match self.compiled.validate(document) {
            Ok(()) => {
                debug!("document conforms to schema");
                return Ok(Conformance);
            }
            Err(errors) => errors,
        };

        let failure = match errors.next() {
            Some(error) => {
                let message = error.to_string();
                let path = error
                    .instance_path
                    .into_iter()
                    .map(|chunk| match chunk {
                        PathChunk::Property(name) => PathSegment::Key(name.to_string()),
                        PathChunk::Index(index) => PathSegment::Index(index),
                        PathChunk::Keyword(keyword) => PathSegment::Key(keyword.to_string()),
                    })
                    .collect();
                ValidationFailure { message, path }
            }
            None => ValidationFailure {
                message: "document does not conform to schema".to_string(),
                path: Vec::new(),
            },
        };
        debug!(location = %failure.location(), "schema violation");
        Err(failure)
    }
}

/// Compile `schema` and check `document` against it in one step
pub fn validate(document: &Value, schema: &Value) -> Result<Conformance> {
    let validator = SchemaValidator::new(schema)?;
    Ok(validator.validate(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video_schema() -> Value {
        json!({
            "type": "object",
            "required": ["videos"],
            "properties": {
                "videos": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["id"],
                        "properties": {
                            "id": { "type": "string" },
                            "match": {
                                "type": "object",
                                "properties": {
                                    "format": { "enum": ["Test", "ODI", "T20I"] }
                                }
                            }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_conforming_document() {
        let doc = json!({ "videos": [{ "id": "a", "match": { "format": "Test" } }] });
        assert_eq!(validate(&doc, &video_schema()).unwrap(), Conformance);
    }

    #[test]
    fn test_missing_required_field_reports_parent_path() {
        let doc = json!({ "videos": [{ "id": "a" }, { "match": {} }] });
        let err = validate(&doc, &video_schema()).unwrap_err();
        let failure = err.violation().expect("schema violation");
        assert_eq!(
            failure.path,
            vec![PathSegment::Key("videos".into()), PathSegment::Index(1)]
        );
        assert!(failure.message.contains("id"));
        assert_eq!(failure.location(), "['videos', 1]");
    }

    #[test]
    fn test_root_violation_has_empty_path() {
        let validator = SchemaValidator::new(&video_schema()).unwrap();
        let failure = validator.validate(&json!({})).unwrap_err();
        assert!(failure.path.is_empty());
        assert_eq!(failure.location(), "[]");
    }

    #[test]
    fn test_enum_violation_path() {
        let doc = json!({ "videos": [{ "id": "a", "match": { "format": "Hundred" } }] });
        let validator = SchemaValidator::new(&video_schema()).unwrap();
        let failure = validator.validate(&doc).unwrap_err();
        assert_eq!(
            failure.path,
            vec![
                PathSegment::Key("videos".into()),
                PathSegment::Index(0),
                PathSegment::Key("match".into()),
                PathSegment::Key("format".into()),
            ]
        );
    }

    #[test]
    fn test_uncompilable_schema() {
        let err = SchemaValidator::new(&json!({ "type": 12 })).err().unwrap();
        assert!(matches!(err, ArchiveError::InvalidSchema(_)));
    }
}
