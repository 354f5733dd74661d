//! Semantic version parsing, formatting and patch bumping.

use semver::Version;
use std::fmt;
use std::str::FromStr;

use crate::error::{ManifestError, Result};

/// A `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` version read from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    inner: Version,
}

impl SemanticVersion {
    /// Parse a version string, ignoring surrounding whitespace.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ManifestError::invalid_version(text, "empty version string"));
        }

        let inner = Version::parse(trimmed).map_err(|e| ManifestError::invalid_version(text, e))?;
        Ok(Self { inner })
    }

    /// Bump the patch component. Prerelease and build metadata stay on the
    /// same track.
    ///
    /// Fails when the patch component is already `u64::MAX`.
    pub fn increment_patch(&self) -> Result<Self> {
        let mut inner = self.inner.clone();
        inner.patch = inner.patch.checked_add(1).ok_or_else(|| {
            ManifestError::invalid_version(self.to_string(), "patch component overflows")
        })?;
        Ok(Self { inner })
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    pub fn prerelease(&self) -> Option<&str> {
        (!self.inner.pre.is_empty()).then(|| self.inner.pre.as_str())
    }

    pub fn build(&self) -> Option<&str> {
        (!self.inner.build.is_empty()).then(|| self.inner.build.as_str())
    }
}

impl FromStr for SemanticVersion {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Where the version applied to a manifest comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Written verbatim to every tracked field. Not validated as semver.
    Explicit(String),
    /// Read the current `Version` field and bump its patch component.
    IncrementPatch,
}

impl VersionSource {
    /// Build the source from the optional `--version` argument.
    ///
    /// An empty or whitespace-only explicit value is rejected instead of
    /// being treated as "not supplied".
    pub fn from_arg(explicit: Option<String>) -> Result<Self> {
        match explicit {
            Some(value) if value.trim().is_empty() => Err(ManifestError::invalid_version(
                value,
                "explicit version must not be empty",
            )),
            Some(value) => Ok(Self::Explicit(value)),
            None => Ok(Self::IncrementPatch),
        }
    }

    /// Compute the resolved version string given the manifest's current
    /// `Version` value.
    pub fn resolve(&self, current: &str) -> Result<String> {
        match self {
            Self::Explicit(value) => Ok(value.clone()),
            Self::IncrementPatch => {
                let version = SemanticVersion::parse(current)?;
                Ok(version.increment_patch()?.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
