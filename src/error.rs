//! Per-manifest error taxonomy.
//!
//! Every variant is scoped to a single manifest file: the batch driver logs
//! it, records a skip in the report and moves on to the next file.

use std::path::PathBuf;
use thiserror::Error;

use crate::fields::TrackedField;

/// Errors raised while processing one manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Not a project file ({}): {reason}", .path.display())]
    NotAManifest { path: PathBuf, reason: String },

    #[error("Not a recognized SDK-style project ({}): {reason}", .path.display())]
    NotRecognized { path: PathBuf, reason: String },

    #[error("Invalid version format '{input}': {reason}")]
    InvalidVersionFormat { input: String, reason: String },

    #[error("Ambiguous field {field}: found {count} occurrences under PropertyGroup")]
    AmbiguousField { field: TrackedField, count: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for results carrying a [`ManifestError`].
pub type Result<T> = std::result::Result<T, ManifestError>;

impl ManifestError {
    pub fn invalid_version(input: impl Into<String>, reason: impl ToString) -> Self {
        ManifestError::InvalidVersionFormat {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn not_recognized(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ManifestError::NotRecognized {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Short status tag used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ManifestError::NotAManifest { .. } => "not-a-manifest",
            ManifestError::NotRecognized { .. } => "not-recognized",
            ManifestError::InvalidVersionFormat { .. } => "invalid-version",
            ManifestError::AmbiguousField { .. } => "ambiguous-field",
            ManifestError::Io { .. } => "io-error",
        }
    }
}
