//! Error types for the LBW archive tools

use std::path::PathBuf;

use thiserror::Error;

use crate::timestamp::TimestampError;
use crate::validator::ValidationFailure;

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Archive errors
///
/// Only the fatal kinds live here. Defects in a single clip or delivery are
/// absorbed where they occur and never surface as an `ArchiveError`.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("{what} file not found: {}", path.display())]
    ResourceMissing { what: &'static str, path: PathBuf },

    #[error("Invalid JSON in {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema could not be compiled: {0}")]
    InvalidSchema(String),

    #[error("Validation error: {0}")]
    SchemaViolation(ValidationFailure),

    #[error("No valid clips with both start and end times were found.")]
    NoQualifyingRecords,

    #[error("Timestamp error: {0}")]
    Timestamp(#[from] TimestampError),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse failure taxonomy, independent of message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ResourceMissing,
    MalformedInput,
    SchemaViolation,
    NoQualifyingRecords,
    Other,
}

impl ArchiveError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ArchiveError::ResourceMissing { .. } => FailureKind::ResourceMissing,
            ArchiveError::MalformedInput { .. } => FailureKind::MalformedInput,
            ArchiveError::SchemaViolation(_) => FailureKind::SchemaViolation,
            ArchiveError::NoQualifyingRecords => FailureKind::NoQualifyingRecords,
            ArchiveError::Io { .. }
            | ArchiveError::InvalidSchema(_)
            | ArchiveError::Timestamp(_)
            | ArchiveError::Config(_)
            | ArchiveError::Json(_) => FailureKind::Other,
        }
    }

    /// The violation carried by a schema failure, if any
    pub fn violation(&self) -> Option<&ValidationFailure> {
        match self {
            ArchiveError::SchemaViolation(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for ArchiveError {
    fn from(failure: ValidationFailure) -> Self {
        ArchiveError::SchemaViolation(failure)
    }
}
