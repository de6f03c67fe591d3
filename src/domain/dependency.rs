//! Dependency information structures

use super::{Coordinates, Scope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One analyzed dependency of the consuming project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Coordinate triple identifying the artifact
    pub coordinates: Coordinates,
    /// Resolution scope the dependency is declared with
    pub scope: Scope,
    /// File name of the backing archive, as produced by the extraction step
    pub archive: PathBuf,
}

impl Dependency {
    pub fn new(coordinates: Coordinates, scope: Scope, archive: impl Into<PathBuf>) -> Self {
        Self {
            coordinates,
            scope,
            archive: archive.into(),
        }
    }

    /// Directory name of the extracted class tree: the archive file name
    /// without its extension
    pub fn archive_stem(&self) -> String {
        self.archive
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.coordinates, self.scope)
    }
}
