//! Per-dependency specialization outcomes

use super::{Coordinates, Dependency, Scope, SpecializedDependency};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason a dependency was left as declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not in the requested coordinate filter
    NotSelected,
    /// Declared with a scope the run ignores
    IgnoredScope(Scope),
    /// The dependency is the consuming project itself
    SelfReference,
    /// No declared type is referenced, removal is the debloater's job
    FullyUnused,
    /// Every declared type is referenced, nothing to remove
    FullyUsed,
    /// Requested coordinates have no entry in the usage report
    NoUsageData,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotSelected => write!(f, "not selected"),
            SkipReason::IgnoredScope(scope) => write!(f, "ignored scope ({})", scope),
            SkipReason::SelfReference => write!(f, "self reference"),
            SkipReason::FullyUnused => write!(f, "fully unused"),
            SkipReason::FullyUsed => write!(f, "fully used"),
            SkipReason::NoUsageData => write!(f, "no usage data"),
        }
    }
}

/// Outcome of the specialization decision for a single dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpecializeResult {
    /// The dependency was pruned, packed, and handed to the publisher
    Specialized {
        dependency: Dependency,
        specialized: SpecializedDependency,
        removed_types: usize,
        total_types: usize,
    },
    /// The dependency was left untouched
    Skipped {
        dependency: Dependency,
        reason: SkipReason,
    },
    /// Specialization was attempted and failed
    Failed {
        dependency: Dependency,
        message: String,
    },
}

impl SpecializeResult {
    pub fn specialized(
        dependency: Dependency,
        specialized: SpecializedDependency,
        removed_types: usize,
        total_types: usize,
    ) -> Self {
        SpecializeResult::Specialized {
            dependency,
            specialized,
            removed_types,
            total_types,
        }
    }

    pub fn skipped(dependency: Dependency, reason: SkipReason) -> Self {
        SpecializeResult::Skipped { dependency, reason }
    }

    pub fn failed(dependency: Dependency, message: impl Into<String>) -> Self {
        SpecializeResult::Failed {
            dependency,
            message: message.into(),
        }
    }

    pub fn is_specialized(&self) -> bool {
        matches!(self, SpecializeResult::Specialized { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, SpecializeResult::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SpecializeResult::Failed { .. })
    }

    pub fn dependency(&self) -> &Dependency {
        match self {
            SpecializeResult::Specialized { dependency, .. } => dependency,
            SpecializeResult::Skipped { dependency, .. } => dependency,
            SpecializeResult::Failed { dependency, .. } => dependency,
        }
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.dependency().coordinates
    }
}

impl fmt::Display for SpecializeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecializeResult::Specialized {
                dependency,
                specialized,
                removed_types,
                total_types,
            } => write!(
                f,
                "{}: specialized as {} ({} of {} types removed)",
                dependency.coordinates, specialized.specialized, removed_types, total_types
            ),
            SpecializeResult::Skipped { dependency, reason } => {
                write!(f, "{}: skipped ({})", dependency.coordinates, reason)
            }
            SpecializeResult::Failed {
                dependency,
                message,
            } => write!(f, "{}: failed ({})", dependency.coordinates, message),
        }
    }
}
