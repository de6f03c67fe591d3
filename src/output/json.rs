//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of specialization results
//! - Structured per-dependency and per-manifest information

use crate::domain::{ManifestOutcome, RunSummary, SpecializeResult};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Whether this was a dry-run
    dry_run: bool,
    /// Summary statistics
    summary: JsonSummary,
    /// Per-dependency results (skips only in verbose mode)
    results: Vec<&'a SpecializeResult>,
    /// Manifest variants attempted
    #[serde(skip_serializing_if = "Vec::is_empty")]
    manifests: Vec<&'a ManifestOutcome>,
    /// Wall-clock duration in seconds
    elapsed_seconds: u64,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Total number of dependencies accounted for
    total: usize,
    /// Number of specialized dependencies
    specialized: usize,
    /// Number of skipped dependencies
    skipped: usize,
    /// Number of failed dependencies
    failed: usize,
    /// Number of manifest variants written
    manifests_written: usize,
    /// Number of manifest variants that failed
    manifests_failed: usize,
}

impl JsonSummary {
    fn from_summary(summary: &RunSummary) -> Self {
        Self {
            total: summary.total_dependencies(),
            specialized: summary.specialized_count(),
            skipped: summary.skipped_count(),
            failed: summary.failed_count(),
            manifests_written: summary.manifests_written(),
            manifests_failed: summary.manifests_failed(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let results: Vec<&SpecializeResult> = if self.verbosity == Verbosity::Verbose {
            summary.results.iter().collect()
        } else {
            summary.results.iter().filter(|r| !r.is_skipped()).collect()
        };

        let output = JsonOutput {
            dry_run: summary.dry_run,
            summary: JsonSummary::from_summary(summary),
            results,
            manifests: summary.manifests.iter().collect(),
            elapsed_seconds: summary.elapsed.as_secs(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }

    fn format_summary(
        &self,
        summary: &RunSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonSummary::from_summary(summary);

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
