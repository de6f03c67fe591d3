//! Maven-style coordinate triples

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static COORDINATES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:\s]+):([^:\s]+):([^:\s]+)$").unwrap());

/// Identity of a dependency artifact: group, artifact, and version
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    /// Group identifier (reverse-domain namespace)
    pub group_id: String,
    /// Artifact identifier
    pub artifact_id: String,
    /// Version string, treated as opaque
    pub version: String,
}

impl Coordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Same artifact and version under a different group
    pub fn with_group(&self, group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

impl FromStr for Coordinates {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = COORDINATES_RE
            .captures(s)
            .ok_or_else(|| format!("invalid coordinates '{}' (expected groupId:artifactId:version)", s))?;
        Ok(Self::new(&captures[1], &captures[2], &captures[3]))
    }
}
