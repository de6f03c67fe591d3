//! Run result summary types
//!
//! Provides structures for tracking specialization results and generated
//! manifest variants across a whole run.

use super::{SpecializeResult, SpecializedDependency};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Manifest generation mode requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// One manifest substituting every specialized dependency
    Single,
    /// One manifest per specialized dependency
    PerDependency,
    /// One manifest per subset of the specialized dependencies
    AllCombinations,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Single => write!(f, "single"),
            GenerationMode::PerDependency => write!(f, "per-dependency"),
            GenerationMode::AllCombinations => write!(f, "all-combinations"),
        }
    }
}

/// Outcome of writing one manifest variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestOutcome {
    /// Where the variant was (or would have been) written
    pub path: PathBuf,
    /// Mode the variant belongs to
    pub mode: GenerationMode,
    /// 1-based position within the mode's enumeration
    pub ordinal: usize,
    /// Number of substitutions this variant applies
    pub subset_size: usize,
    /// Error message when the variant could not be written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ManifestOutcome {
    pub fn written(
        path: impl Into<PathBuf>,
        mode: GenerationMode,
        ordinal: usize,
        subset_size: usize,
    ) -> Self {
        Self {
            path: path.into(),
            mode,
            ordinal,
            subset_size,
            error: None,
        }
    }

    pub fn failed(
        path: impl Into<PathBuf>,
        mode: GenerationMode,
        ordinal: usize,
        subset_size: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            mode,
            ordinal,
            subset_size,
            error: Some(message.into()),
        }
    }

    pub fn is_written(&self) -> bool {
        self.error.is_none()
    }
}

/// Overall summary of one specialization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Per-dependency results in processing order
    pub results: Vec<SpecializeResult>,
    /// Manifest variants attempted after the specialization phase
    pub manifests: Vec<ManifestOutcome>,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            results: Vec::new(),
            manifests: Vec::new(),
            dry_run,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn add_result(&mut self, result: SpecializeResult) {
        self.results.push(result);
    }

    pub fn add_manifest(&mut self, outcome: ManifestOutcome) {
        self.manifests.push(outcome);
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Returns the total number of dependencies accounted for
    pub fn total_dependencies(&self) -> usize {
        self.results.len()
    }

    pub fn specialized_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_specialized()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_skipped()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    pub fn specialized(&self) -> impl Iterator<Item = &SpecializeResult> {
        self.results.iter().filter(|r| r.is_specialized())
    }

    pub fn skips(&self) -> impl Iterator<Item = &SpecializeResult> {
        self.results.iter().filter(|r| r.is_skipped())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SpecializeResult> {
        self.results.iter().filter(|r| r.is_failed())
    }

    /// Coordinate mappings of every successfully specialized dependency
    pub fn specialized_dependencies(&self) -> Vec<SpecializedDependency> {
        self.results
            .iter()
            .filter_map(|result| match result {
                SpecializeResult::Specialized { specialized, .. } => Some(specialized.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn manifests_written(&self) -> usize {
        self.manifests.iter().filter(|m| m.is_written()).count()
    }

    pub fn manifests_failed(&self) -> usize {
        self.manifests.iter().filter(|m| !m.is_written()).count()
    }

    /// Returns true if any dependency or manifest variant failed
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0 || self.manifests_failed() > 0
    }

    /// Elapsed time as minutes and seconds, e.g. "1min 42s"
    pub fn elapsed_display(&self) -> String {
        let total_seconds = self.elapsed.as_secs();
        format!("{}min {}s", total_seconds / 60, total_seconds % 60)
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new(false)
    }
}
