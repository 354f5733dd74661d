//! Version-carrying manifest fields and the synchronizer that rewrites them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::document::ManifestNode;
use crate::error::{ManifestError, Result};

/// Element grouping project properties.
pub const PROPERTY_GROUP: &str = "PropertyGroup";

/// A field kept in sync with the resolved version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrackedField {
    Version,
    FileVersion,
    AssemblyVersion,
    PackageVersion,
    InformationVersion,
}

impl TrackedField {
    /// All tracked fields. `Version` comes first since it drives resolution.
    pub const ALL: [TrackedField; 5] = [
        TrackedField::Version,
        TrackedField::FileVersion,
        TrackedField::AssemblyVersion,
        TrackedField::PackageVersion,
        TrackedField::InformationVersion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Version => "Version",
            Self::FileVersion => "FileVersion",
            Self::AssemblyVersion => "AssemblyVersion",
            Self::PackageVersion => "PackageVersion",
            Self::InformationVersion => "InformationVersion",
        }
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackedField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown tracked field: {}", s))
    }
}

/// Count occurrences of `field` one level below any `PropertyGroup`.
pub fn field_occurrences<N: ManifestNode>(project: &N, field: TrackedField) -> usize {
    project
        .children_named(PROPERTY_GROUP)
        .into_iter()
        .map(|group| group.children_named(field.as_str()).len())
        .sum()
}

fn ensure_unique<N: ManifestNode>(project: &N, field: TrackedField) -> Result<()> {
    match field_occurrences(project, field) {
        0 | 1 => Ok(()),
        count => Err(ManifestError::AmbiguousField { field, count }),
    }
}

/// Read the current value of `field` without modifying the document.
///
/// Missing fields read as an empty string.
pub fn current_value<N: ManifestNode>(project: &N, field: TrackedField) -> Result<String> {
    ensure_unique(project, field)?;

    Ok(project
        .children_named(PROPERTY_GROUP)
        .into_iter()
        .flat_map(|group| group.children_named(field.as_str()))
        .next()
        .map(|node| node.text())
        .unwrap_or_default())
}

/// Set `field` to `value`, creating the field (and a `PropertyGroup`) when
/// absent. Returns the previous value, empty if the field was just created.
pub fn ensure_and_set<N: ManifestNode>(
    project: &mut N,
    field: TrackedField,
    value: &str,
) -> Result<String> {
    ensure_unique(project, field)?;

    let mut previous = None;
    for group in project.children_named_mut(PROPERTY_GROUP) {
        for node in group.children_named_mut(field.as_str()) {
            previous = Some(node.text());
            node.set_text(value);
        }
    }

    if let Some(previous) = previous {
        return Ok(previous);
    }

    let node = project
        .get_or_create_child(PROPERTY_GROUP)
        .get_or_create_child(field.as_str());
    let previous = node.text();
    node.set_text(value);
    Ok(previous)
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
