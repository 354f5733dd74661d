//! Scan configuration resolved once at startup.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Directory names never descended into while scanning.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", "bin", "obj", "node_modules"];

/// Where to look for project files and what to skip.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub excluded_dirs: Vec<String>,
}

impl ScanConfig {
    /// Build a config for an explicit, existing directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let metadata = std::fs::metadata(root)
            .with_context(|| format!("Start directory {} does not exist", root.display()))?;

        if !metadata.is_dir() {
            anyhow::bail!("Start directory {} is not a directory", root.display());
        }

        Ok(Self {
            root: root.to_path_buf(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        })
    }

    /// Use `directory` if given, otherwise the current working directory.
    pub fn resolve(directory: Option<PathBuf>) -> Result<Self> {
        let root = match directory {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        Self::new(root)
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == dir_name)
    }
}

/// Whether a file name matches the `*.??proj` project file pattern.
pub fn is_project_file_name(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty()
                && ext.chars().count() == 6
                && ext.to_ascii_lowercase().ends_with("proj")
        }
        None => false,
    }
}
