//! Structured document access for project manifests.
//!
//! The field synchronizer only talks to [`ManifestNode`], so the XML backend
//! is confined to this module.

use std::path::{Path, PathBuf};
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{ManifestError, Result};

/// Name of the root element of an MSBuild project file.
pub const PROJECT_ELEMENT: &str = "Project";

/// Attribute whose presence marks an SDK-style project.
pub const SDK_MARKER: &str = "Sdk";

/// Tree node capabilities needed to read and rewrite manifest fields.
pub trait ManifestNode {
    fn node_name(&self) -> &str;

    fn has_attribute(&self, name: &str) -> bool;

    /// Direct children with the given element name, in document order.
    fn children_named(&self, name: &str) -> Vec<&Self>;

    fn children_named_mut(&mut self, name: &str) -> Vec<&mut Self>;

    /// Append a new empty child element and return it.
    fn create_child(&mut self, name: &str) -> &mut Self;

    /// Return the first child with the given name, appending one if absent.
    fn get_or_create_child(&mut self, name: &str) -> &mut Self;

    /// Text content, empty when the node has none.
    fn text(&self) -> String;

    /// Replace all content of the node with `value`.
    fn set_text(&mut self, value: &str);

    fn find_child(&self, name: &str) -> Option<&Self> {
        self.children_named(name).into_iter().next()
    }
}

impl ManifestNode for Element {
    fn node_name(&self) -> &str {
        &self.name
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    fn children_named(&self, name: &str) -> Vec<&Self> {
        self.children
            .iter()
            .filter_map(|node| match node {
                XMLNode::Element(element) if element.name == name => Some(element),
                _ => None,
            })
            .collect()
    }

    fn children_named_mut(&mut self, name: &str) -> Vec<&mut Self> {
        self.children
            .iter_mut()
            .filter_map(|node| match node {
                XMLNode::Element(element) if element.name == name => Some(element),
                _ => None,
            })
            .collect()
    }

    fn create_child(&mut self, name: &str) -> &mut Self {
        // New children live in the parent's namespace.
        let mut child = Element::new(name);
        child.prefix = self.prefix.clone();
        child.namespace = self.namespace.clone();
        self.children.push(XMLNode::Element(child));
        let index = self.children.len() - 1;
        element_at(&mut self.children, index)
    }

    fn get_or_create_child(&mut self, name: &str) -> &mut Self {
        let existing = self
            .children
            .iter()
            .position(|node| matches!(node, XMLNode::Element(element) if element.name == name));

        match existing {
            Some(index) => element_at(&mut self.children, index),
            None => self.create_child(name),
        }
    }

    fn text(&self) -> String {
        self.get_text()
            .map(|text| text.into_owned())
            .unwrap_or_default()
    }

    fn set_text(&mut self, value: &str) {
        self.children.clear();
        if !value.is_empty() {
            self.children.push(XMLNode::Text(value.to_string()));
        }
    }
}

fn element_at(children: &mut [XMLNode], index: usize) -> &mut Element {
    match &mut children[index] {
        XMLNode::Element(element) => element,
        _ => unreachable!("child {index} was matched as an element"),
    }
}

/// One project file loaded into memory.
///
/// Mutations stay in memory until [`ManifestDocument::save`]; dropping the
/// document discards them.
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    path: PathBuf,
    root: Element,
    declaration: bool,
}

impl ManifestDocument {
    /// Load and parse a manifest from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::InvalidData {
                ManifestError::NotAManifest {
                    path: path.to_path_buf(),
                    reason: format!("not valid UTF-8 text: {source}"),
                }
            } else {
                ManifestError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::parse(path, &content)
    }

    /// Parse manifest content that belongs to `path`.
    pub fn parse(path: impl AsRef<Path>, content: &str) -> Result<Self> {
        let path = path.as_ref();
        let root = Element::parse(content.as_bytes()).map_err(|e| ManifestError::NotAManifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let declaration = content
            .trim_start_matches('\u{feff}')
            .trim_start()
            .starts_with("<?xml");

        Ok(Self {
            path: path.to_path_buf(),
            root,
            declaration,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The `<Project Sdk="...">` root, or `NotRecognized`.
    pub fn project(&self) -> Result<&Element> {
        self.check_project()?;
        Ok(&self.root)
    }

    pub fn project_mut(&mut self) -> Result<&mut Element> {
        self.check_project()?;
        Ok(&mut self.root)
    }

    fn check_project(&self) -> Result<()> {
        if self.root.node_name() != PROJECT_ELEMENT {
            return Err(ManifestError::not_recognized(
                &self.path,
                format!(
                    "root element is <{}>, expected <{}>",
                    self.root.node_name(),
                    PROJECT_ELEMENT
                ),
            ));
        }
        if !self.root.has_attribute(SDK_MARKER) {
            return Err(ManifestError::not_recognized(
                &self.path,
                format!("missing {} attribute on <{}>", SDK_MARKER, PROJECT_ELEMENT),
            ));
        }
        Ok(())
    }

    /// Serialize the whole document.
    pub fn to_xml_string(&self) -> Result<String> {
        let config = EmitterConfig::new()
            .perform_indent(true)
            .indent_string("  ")
            .write_document_declaration(self.declaration);

        let mut buffer = Vec::new();
        self.root
            .write_with_config(&mut buffer, config)
            .map_err(|e| self.io_error(e.to_string()))?;

        let mut xml = String::from_utf8(buffer).map_err(|e| self.io_error(e.to_string()))?;
        xml.push('\n');
        Ok(xml)
    }

    /// Write the manifest back to its original path.
    pub fn save(&self) -> Result<()> {
        let xml = self.to_xml_string()?;
        std::fs::write(&self.path, xml).map_err(|source| ManifestError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn io_error(&self, message: String) -> ManifestError {
        ManifestError::Io {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, message),
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
