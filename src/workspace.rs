//! Project file discovery.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{is_project_file_name, ScanConfig};

/// Walks the scan root for project files.
#[derive(Debug)]
pub struct WorkspaceScanner {
    config: ScanConfig,
}

impl WorkspaceScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Find all project files below the root, sorted by path.
    ///
    /// Unreadable entries below the root are logged and skipped; failing to
    /// read the root itself is an error.
    pub fn find_manifests(&self) -> Result<Vec<PathBuf>> {
        let mut manifests = Vec::new();

        let walker = WalkDir::new(&self.config.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                !self.config.is_excluded(name.as_ref())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(e).with_context(|| {
                        format!("Failed to read {}", self.config.root.display())
                    });
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            if entry.file_type().is_file()
                && is_project_file_name(entry.file_name().to_string_lossy().as_ref())
            {
                debug!(path = %entry.path().display(), "found project file");
                manifests.push(entry.into_path());
            }
        }

        manifests.sort();
        Ok(manifests)
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
