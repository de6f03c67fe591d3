//! Dependency manifest loading and rewriting
//!
//! The manifest is a pom-style XML document. Rewriting swaps matched
//! dependency entries to their specialized coordinates in memory; the
//! input file itself is never modified.

use crate::domain::{Coordinates, SpecializedDependency};
use crate::error::ManifestError;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use xml::EmitterConfig;
use xmltree::{Element, XMLNode};

/// A loaded dependency manifest
#[derive(Debug, Clone)]
pub struct PomDocument {
    path: PathBuf,
    root: Element,
}

impl PomDocument {
    /// Parses the manifest at `path`
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::not_found(path));
        }
        let content = std::fs::read(path).map_err(|e| ManifestError::read_error(path, e))?;
        let root = Element::parse(content.as_slice())
            .map_err(|e| ManifestError::parse_error(path, e.to_string()))?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The consuming project's own coordinates. Group and version fall back
    /// to the parent declaration the way manifest inheritance does.
    pub fn project_coordinates(&self) -> Result<Coordinates, ManifestError> {
        let parent = self.root.get_child("parent");
        let group_id = child_text(&self.root, "groupId")
            .or_else(|| parent.and_then(|p| child_text(p, "groupId")))
            .ok_or_else(|| ManifestError::missing_project_element(&self.path, "groupId"))?;
        let artifact_id = child_text(&self.root, "artifactId")
            .ok_or_else(|| ManifestError::missing_project_element(&self.path, "artifactId"))?;
        let version = child_text(&self.root, "version")
            .or_else(|| parent.and_then(|p| child_text(p, "version")))
            .ok_or_else(|| ManifestError::missing_project_element(&self.path, "version"))?;
        Ok(Coordinates::new(group_id, artifact_id, version))
    }

    /// Rewrites every dependency element whose (group, artifact) pair
    /// matches a substitution, anywhere in the tree. Returns how many
    /// elements were rewritten.
    pub fn substitute_all(
        &mut self,
        substitutions: &[SpecializedDependency],
    ) -> Result<usize, ManifestError> {
        let path = self.path.clone();
        substitute_in_element(&mut self.root, substitutions, &path)
    }

    /// Serializes the document to `output`, indented
    pub fn save(&self, output: &Path) -> Result<(), ManifestError> {
        let file = File::create(output).map_err(|e| ManifestError::write_error(output, e))?;
        let config = EmitterConfig::new().perform_indent(true);
        self.root
            .write_with_config(BufWriter::new(file), config)
            .map_err(|e| ManifestError::emit_error(output, e.to_string()))
    }
}

fn substitute_in_element(
    element: &mut Element,
    substitutions: &[SpecializedDependency],
    path: &Path,
) -> Result<usize, ManifestError> {
    let mut rewritten = 0;
    if element.name == "dependency" {
        if let Some(substitution) = matching_substitution(element, substitutions) {
            apply_substitution(element, &substitution, path)?;
            rewritten += 1;
        }
    }
    for node in element.children.iter_mut() {
        if let XMLNode::Element(child) = node {
            rewritten += substitute_in_element(child, substitutions, path)?;
        }
    }
    Ok(rewritten)
}

fn matching_substitution(
    element: &Element,
    substitutions: &[SpecializedDependency],
) -> Option<SpecializedDependency> {
    let group_id = child_text(element, "groupId")?;
    let artifact_id = child_text(element, "artifactId")?;
    substitutions
        .iter()
        .find(|substitution| {
            substitution.original.group_id == group_id
                && substitution.original.artifact_id == artifact_id
        })
        .cloned()
}

fn apply_substitution(
    element: &mut Element,
    substitution: &SpecializedDependency,
    path: &Path,
) -> Result<(), ManifestError> {
    set_child_text(element, "groupId", &substitution.specialized.group_id);
    set_child_text(element, "artifactId", &substitution.specialized.artifact_id);
    if !set_child_text(element, "version", &substitution.specialized.version) {
        return Err(ManifestError::missing_dependency_element(
            path,
            "version",
            substitution.original.to_string(),
        ));
    }
    Ok(())
}

fn child_text(element: &Element, name: &str) -> Option<String> {
    element
        .get_child(name)
        .and_then(|child| child.get_text())
        .map(|text| text.trim().to_string())
}

fn set_child_text(element: &mut Element, name: &str, value: &str) -> bool {
    match element.get_mut_child(name) {
        Some(child) => {
            child.children = vec![XMLNode::Text(value.to_string())];
            true
        }
        None => false,
    }
}
