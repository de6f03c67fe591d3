//! Specialized-artifact coordinate mapping

use super::Coordinates;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Group namespace specialized artifacts are published under by default
pub const SPECIALIZED_GROUP_ID: &str = "io.depspec.spl";

/// Record that an original coordinate triple has a specialized counterpart
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecializedDependency {
    /// Coordinates the project originally declared
    pub original: Coordinates,
    /// Coordinates the specialized artifact is published under
    pub specialized: Coordinates,
}

impl SpecializedDependency {
    /// Maps original coordinates into the specialization namespace.
    /// Artifact id and version are preserved, only the group changes.
    pub fn remap(original: &Coordinates, specialized_group: &str) -> Self {
        Self {
            original: original.clone(),
            specialized: original.with_group(specialized_group),
        }
    }
}

impl fmt::Display for SpecializedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.original, self.specialized)
    }
}

// Ordered by the original coordinate string so subset enumerations are
// reproducible across runs
impl Ord for SpecializedDependency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.original
            .to_string()
            .cmp(&other.original.to_string())
            .then_with(|| self.original.cmp(&other.original))
            .then_with(|| self.specialized.cmp(&other.specialized))
    }
}

impl PartialOrd for SpecializedDependency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
