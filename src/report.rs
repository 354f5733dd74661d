//! Per-file results and their console / JSON rendering.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::fields::TrackedField;

/// How synchronize results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Path header plus one transition line per field.
    Normal,
    /// Only the resolved version, one line per updated file.
    Plain,
}

/// A field assignment performed on one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: TrackedField,
    pub previous: String,
    pub current: String,
}

/// A field value read in list mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    pub field: TrackedField,
    pub value: String,
}

#[derive(Debug)]
pub enum FileOutcome {
    Updated {
        version: String,
        changes: Vec<FieldChange>,
    },
    Listed {
        fields: Vec<FieldValue>,
    },
    Skipped(ManifestError),
}

/// Result of processing a single manifest.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    path: &'a Path,
    status: &'static str,
    fields: &'a [FieldValue],
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl FileReport {
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, FileOutcome::Skipped(_))
    }

    /// The version written to this manifest, if it was updated.
    pub fn resolved_version(&self) -> Option<&str> {
        match &self.outcome {
            FileOutcome::Updated { version, .. } => Some(version),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ManifestError> {
        match &self.outcome {
            FileOutcome::Skipped(err) => Some(err),
            _ => None,
        }
    }

    fn render(&self, mode: OutputMode, out: &mut String) {
        if mode == OutputMode::Plain {
            if let Some(version) = self.resolved_version() {
                out.push_str(version);
                out.push('\n');
            }
            return;
        }

        out.push_str(&format!("{}\n", self.path.display().to_string().bright_white()));

        match &self.outcome {
            FileOutcome::Updated { changes, .. } => {
                for change in changes {
                    out.push_str(&format!(
                        "  Set {} from {} -> {}\n",
                        format!("{:<20}", change.field.as_str()).cyan(),
                        display_value(&change.previous),
                        change.current.green()
                    ));
                }
            }
            FileOutcome::Listed { fields } => {
                for field in fields {
                    out.push_str(
                        format!("  {:<20} = {}", field.field.as_str(), field.value).trim_end(),
                    );
                    out.push('\n');
                }
            }
            FileOutcome::Skipped(err) => {
                out.push_str(&format!("  {}\n", format!("(Skipped. {})", err).yellow()));
            }
        }

        out.push('\n');
    }

    fn list_entry(&self) -> ListEntry<'_> {
        let (status, fields, reason) = match &self.outcome {
            FileOutcome::Listed { fields } => ("listed", fields.as_slice(), None),
            FileOutcome::Updated { .. } => ("updated", [].as_slice(), None),
            FileOutcome::Skipped(err) => (err.kind(), [].as_slice(), Some(err.to_string())),
        };

        ListEntry {
            path: &self.path,
            status,
            fields,
            reason,
        }
    }
}

fn display_value(value: &str) -> String {
    if value.is_empty() {
        "\"\"".dimmed().to_string()
    } else {
        value.to_string()
    }
}

/// Which operation produced a batch report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchKind {
    #[default]
    Sync,
    List,
}

/// Results for a whole scan.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub kind: BatchKind,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn sync(files: Vec<FileReport>) -> Self {
        Self {
            kind: BatchKind::Sync,
            files,
        }
    }

    pub fn list(files: Vec<FileReport>) -> Self {
        Self {
            kind: BatchKind::List,
            files,
        }
    }

    pub fn updated_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Updated { .. }))
            .count()
    }

    pub fn listed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Listed { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_skipped()).count()
    }

    /// Render the report as it is printed to stdout.
    pub fn render(&self, mode: OutputMode) -> String {
        let mut out = String::new();
        for file in &self.files {
            file.render(mode, &mut out);
        }

        if mode == OutputMode::Normal {
            let summary = match self.kind {
                BatchKind::List => {
                    format!("{} listed, {} skipped", self.listed_count(), self.skipped_count())
                }
                BatchKind::Sync => {
                    format!("{} updated, {} skipped", self.updated_count(), self.skipped_count())
                }
            };
            out.push_str(&format!("{}\n", summary.bold()));
        }

        out
    }

    /// JSON array with one entry per discovered file.
    pub fn to_json(&self) -> Result<String> {
        let entries: Vec<ListEntry<'_>> = self.files.iter().map(FileReport::list_entry).collect();
        serde_json::to_string_pretty(&entries).context("Failed to serialize report")
    }

    pub fn print(&self, mode: OutputMode) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(self.render(mode).as_bytes())
            .context("Failed to write report")?;
        stdout.flush().context("Failed to write report")
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
