//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Human-readable specialization result display with colors
//! - Original to specialized coordinate mapping per dependency
//! - Skipped dependency display with reasons
//! - Summary with skip-reason breakdown and elapsed time

use crate::domain::{RunSummary, SpecializeResult};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Share of declared types that was removed, as a whole percentage
pub fn reduction_percent(removed: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (removed * 100 + total / 2) / total
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if self.dry_run {
            if self.color {
                format!("{} ", "(dry-run)".cyan())
            } else {
                "(dry-run) ".to_string()
            }
        } else {
            String::new()
        }
    }

    /// Calculate the maximum coordinate length for alignment
    fn max_coordinate_length(&self, results: &[&SpecializeResult]) -> usize {
        results
            .iter()
            .map(|r| r.coordinates().to_string().len())
            .max()
            .unwrap_or(0)
    }

    /// Format a single specialization line
    fn format_specialized_line(
        &self,
        result: &SpecializeResult,
        max_coord_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let SpecializeResult::Specialized {
            dependency,
            specialized,
            removed_types,
            total_types,
        } = result
        else {
            return Ok(());
        };
        let percent = reduction_percent(*removed_types, *total_types);
        let original = dependency.coordinates.to_string();
        let detail = format!(
            "(removed {} of {} types, {}%)",
            removed_types, total_types, percent
        );

        if self.color {
            let original_display = format!("{:width$}", original, width = max_coord_len);
            writeln!(
                writer,
                "  {} {} {} {}",
                original_display,
                "→".dimmed(),
                specialized.specialized.to_string().bright_white().bold(),
                detail.dimmed()
            )
        } else {
            writeln!(
                writer,
                "  {:width$} -> {} {}",
                original,
                specialized.specialized,
                detail,
                width = max_coord_len
            )
        }
    }

    /// Format a single skip line
    fn format_skip_line(
        &self,
        result: &SpecializeResult,
        max_coord_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let SpecializeResult::Skipped { dependency, reason } = result else {
            return Ok(());
        };
        let coordinates = dependency.coordinates.to_string();

        if self.color {
            let coord_display = format!("{:width$}", coordinates, width = max_coord_len);
            writeln!(
                writer,
                "  {} {}",
                coord_display.dimmed(),
                format!("({})", reason).dimmed()
            )
        } else {
            writeln!(
                writer,
                "  {:width$} ({})",
                coordinates,
                reason,
                width = max_coord_len
            )
        }
    }

    /// Count skips by reason
    fn count_by_skip_reason(&self, summary: &RunSummary) -> Vec<(String, usize)> {
        use std::collections::HashMap;
        let mut counts: HashMap<String, usize> = HashMap::new();

        for result in summary.skips() {
            if let SpecializeResult::Skipped { reason, .. } = result {
                *counts.entry(reason.to_string()).or_insert(0) += 1;
            }
        }

        let mut result: Vec<_> = counts.into_iter().collect();
        result.sort_by(|a, b| b.1.cmp(&a.1)); // Sort by count descending
        result
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(summary, writer);
        }

        let prefix = self.dry_run_prefix();

        // Format specialized dependencies
        let specialized: Vec<_> = summary.specialized().collect();
        if !specialized.is_empty() {
            if self.color {
                writeln!(writer, "{}{}:", prefix, "Specialized".bold())?;
            } else {
                writeln!(writer, "{}Specialized:", prefix)?;
            }
            let max_coord_len = self.max_coordinate_length(&specialized).max(20);
            for result in &specialized {
                self.format_specialized_line(result, max_coord_len, writer)?;
            }
            writeln!(writer)?;
        }

        // Format failures if any
        let failures: Vec<_> = summary.failures().collect();
        if !failures.is_empty() {
            if self.color {
                writeln!(writer, "{}:", "Failures".red().bold())?;
            } else {
                writeln!(writer, "Failures:")?;
            }
            for result in &failures {
                if let SpecializeResult::Failed {
                    dependency,
                    message,
                } = result
                {
                    if self.color {
                        writeln!(
                            writer,
                            "  {} {}: {}",
                            "✗".red(),
                            dependency.coordinates,
                            message
                        )?;
                    } else {
                        writeln!(writer, "  - {}: {}", dependency.coordinates, message)?;
                    }
                }
            }
            writeln!(writer)?;
        }

        // Format skips in verbose mode
        let skips: Vec<_> = summary.skips().collect();
        if self.verbosity == Verbosity::Verbose && !skips.is_empty() {
            if self.color {
                writeln!(writer, "{}", "Skipped:".dimmed())?;
            } else {
                writeln!(writer, "Skipped:")?;
            }
            let max_coord_len = self.max_coordinate_length(&skips).max(20);
            for result in &skips {
                self.format_skip_line(result, max_coord_len, writer)?;
            }
            writeln!(writer)?;
        }

        // Format manifest variants
        if !summary.manifests.is_empty() {
            if self.color {
                writeln!(writer, "{}:", "Manifest variants".bold())?;
            } else {
                writeln!(writer, "Manifest variants:")?;
            }
            for outcome in &summary.manifests {
                let path_display = outcome.path.display().to_string();
                match &outcome.error {
                    None => {
                        if self.color {
                            writeln!(
                                writer,
                                "  {} {}",
                                path_display,
                                format!("[{}]", outcome.mode).dimmed()
                            )?;
                        } else {
                            writeln!(writer, "  {} [{}]", path_display, outcome.mode)?;
                        }
                    }
                    Some(error) => {
                        if self.color {
                            writeln!(writer, "  {} {}: {}", "✗".red(), path_display, error)?;
                        } else {
                            writeln!(writer, "  - {}: {}", path_display, error)?;
                        }
                    }
                }
            }
            writeln!(writer)?;
        }

        // Format summary
        self.format_summary(summary, writer)?;

        Ok(())
    }

    fn format_summary(
        &self,
        summary: &RunSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();
        let specialized = summary.specialized_count();
        let skips = summary.skipped_count();
        let failed = summary.failed_count();

        if self.verbosity == Verbosity::Quiet {
            // Minimal output
            if specialized > 0 {
                if self.color {
                    writeln!(
                        writer,
                        "{}{} {}",
                        prefix,
                        specialized.to_string().green(),
                        "specialized"
                    )?;
                } else {
                    writeln!(writer, "{}{} specialized", prefix, specialized)?;
                }
            } else {
                if self.color {
                    writeln!(writer, "{}{}", prefix, "No dependencies specialized".dimmed())?;
                } else {
                    writeln!(writer, "{}No dependencies specialized", prefix)?;
                }
            }
            return Ok(());
        }

        // Normal/verbose output
        if self.color {
            writeln!(writer, "{}{}:", prefix, "Summary".bold())?;

            if specialized > 0 {
                writeln!(
                    writer,
                    "  {} {} specialized",
                    specialized.to_string().green(),
                    if specialized == 1 {
                        "dependency"
                    } else {
                        "dependencies"
                    }
                )?;
            } else {
                writeln!(writer, "  {}", "No dependencies specialized".dimmed())?;
            }

            if skips > 0 {
                let skip_counts = self.count_by_skip_reason(summary);
                let parts: Vec<_> = skip_counts
                    .iter()
                    .map(|(reason, count)| format!("{} {}", count, reason))
                    .collect();
                writeln!(
                    writer,
                    "  {} skipped ({})",
                    skips.to_string().dimmed(),
                    parts.join(", ").dimmed()
                )?;
            }

            if failed > 0 {
                writeln!(writer, "  {} failed", failed.to_string().red())?;
            }

            if !summary.manifests.is_empty() {
                let written = summary.manifests_written();
                let manifest_failures = summary.manifests_failed();
                write!(
                    writer,
                    "  {} manifest {} written",
                    written.to_string().green(),
                    if written == 1 { "variant" } else { "variants" }
                )?;
                if manifest_failures > 0 {
                    write!(writer, ", {} failed", manifest_failures.to_string().red())?;
                }
                writeln!(writer)?;
            }

            writeln!(
                writer,
                "  {}",
                format!("Elapsed: {}", summary.elapsed_display()).dimmed()
            )?;
        } else {
            writeln!(writer, "{}Summary:", prefix)?;

            if specialized > 0 {
                writeln!(
                    writer,
                    "  {} {} specialized",
                    specialized,
                    if specialized == 1 {
                        "dependency"
                    } else {
                        "dependencies"
                    }
                )?;
            } else {
                writeln!(writer, "  No dependencies specialized")?;
            }

            if skips > 0 {
                let skip_counts = self.count_by_skip_reason(summary);
                let parts: Vec<_> = skip_counts
                    .iter()
                    .map(|(reason, count)| format!("{} {}", count, reason))
                    .collect();
                writeln!(writer, "  {} skipped ({})", skips, parts.join(", "))?;
            }

            if failed > 0 {
                writeln!(writer, "  {} failed", failed)?;
            }

            if !summary.manifests.is_empty() {
                let written = summary.manifests_written();
                let manifest_failures = summary.manifests_failed();
                write!(
                    writer,
                    "  {} manifest {} written",
                    written,
                    if written == 1 { "variant" } else { "variants" }
                )?;
                if manifest_failures > 0 {
                    write!(writer, ", {} failed", manifest_failures)?;
                }
                writeln!(writer)?;
            }

            writeln!(writer, "  Elapsed: {}", summary.elapsed_display())?;
        }

        Ok(())
    }
}
