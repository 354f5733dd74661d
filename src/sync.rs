//! Batch driver: applies one resolved version to every tracked field of each
//! discovered project file.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::document::ManifestDocument;
use crate::error::ManifestError;
use crate::fields::{current_value, ensure_and_set, TrackedField};
use crate::report::{BatchReport, FieldChange, FieldValue, FileOutcome, FileReport};
use crate::version::VersionSource;
use crate::workspace::WorkspaceScanner;

/// Synchronizes tracked version fields across project files.
#[derive(Debug, Clone)]
pub struct VersionSync {
    source: VersionSource,
}

impl VersionSync {
    pub fn new(source: VersionSource) -> Self {
        Self { source }
    }

    /// Scan the workspace and update every project file found.
    pub fn sync_workspace(&self, scanner: &WorkspaceScanner) -> Result<BatchReport> {
        let paths = scanner
            .find_manifests()
            .context("Failed to scan for project files")?;
        Ok(self.process(&paths))
    }

    /// Update each file independently. A failure on one file never stops
    /// the batch.
    pub fn process<P: AsRef<Path>>(&self, paths: &[P]) -> BatchReport {
        let files = paths
            .iter()
            .map(|path| self.process_file(path.as_ref()))
            .collect();
        BatchReport::sync(files)
    }

    pub fn process_file(&self, path: &Path) -> FileReport {
        let outcome = match self.sync_file(path) {
            Ok((version, changes)) => FileOutcome::Updated { version, changes },
            Err(err) => {
                log_skip(path, &err);
                FileOutcome::Skipped(err)
            }
        };

        FileReport {
            path: path.to_path_buf(),
            outcome,
        }
    }

    /// Load, mutate in memory, and only write once every field was set.
    fn sync_file(&self, path: &Path) -> crate::error::Result<(String, Vec<FieldChange>)> {
        let mut document = ManifestDocument::load(path)?;
        let project = document.project_mut()?;

        let current = current_value(project, TrackedField::Version)?;
        let version = self.source.resolve(&current)?;

        let mut changes = Vec::with_capacity(TrackedField::ALL.len());
        for field in TrackedField::ALL {
            let previous = ensure_and_set(project, field, &version)?;
            debug!(path = %path.display(), %field, %previous, current = %version, "set field");
            changes.push(FieldChange {
                field,
                previous,
                current: version.clone(),
            });
        }

        document.save()?;
        Ok((version, changes))
    }

    /// Scan the workspace and report current values without writing.
    pub fn list_workspace(scanner: &WorkspaceScanner) -> Result<BatchReport> {
        let paths = scanner
            .find_manifests()
            .context("Failed to scan for project files")?;
        Ok(Self::list(&paths))
    }

    /// Read-only counterpart of [`VersionSync::process`].
    pub fn list<P: AsRef<Path>>(paths: &[P]) -> BatchReport {
        let files = paths
            .iter()
            .map(|path| {
                let path: &Path = path.as_ref();
                let outcome = match read_fields(path) {
                    Ok(fields) => FileOutcome::Listed { fields },
                    Err(err) => {
                        log_skip(path, &err);
                        FileOutcome::Skipped(err)
                    }
                };
                FileReport {
                    path: path.to_path_buf(),
                    outcome,
                }
            })
            .collect();
        BatchReport::list(files)
    }
}

fn read_fields(path: &Path) -> crate::error::Result<Vec<FieldValue>> {
    let document = ManifestDocument::load(path)?;
    let project = document.project()?;

    TrackedField::ALL
        .into_iter()
        .map(|field| -> crate::error::Result<FieldValue> {
            Ok(FieldValue {
                field,
                value: current_value(project, field)?,
            })
        })
        .collect()
}

fn log_skip(path: &Path, err: &ManifestError) {
    match err {
        ManifestError::NotRecognized { .. } => {
            info!(path = %path.display(), "skipping: {}", err)
        }
        _ => warn!(path = %path.display(), kind = err.kind(), "skipping: {}", err),
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
