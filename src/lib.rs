//! Version synchronization for .NET SDK-style project files.
//!
//! Discovers `*.??proj` files below a start directory and keeps their
//! `Version`, `FileVersion`, `AssemblyVersion`, `PackageVersion` and
//! `InformationVersion` properties in step, either by bumping the patch
//! component of the current `Version` or by writing an explicit value.

pub mod config;
pub mod document;
pub mod error;
pub mod fields;
pub mod report;
pub mod sync;
pub mod version;
pub mod workspace;

pub use config::ScanConfig;
pub use document::{ManifestDocument, ManifestNode};
pub use error::ManifestError;
pub use fields::{ensure_and_set, TrackedField};
pub use report::{BatchKind, BatchReport, FileOutcome, FileReport, OutputMode};
pub use sync::VersionSync;
pub use version::{SemanticVersion, VersionSource};
pub use workspace::WorkspaceScanner;
