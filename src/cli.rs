//! CLI argument parsing module for depspec
//!
//! Defines the command line surface and the path-resolution helpers the
//! rest of the application works from.

use crate::domain::{Coordinates, GenerationMode, Scope, SPECIALIZED_GROUP_ID};
use crate::publish::DEFAULT_PUBLISH_TIMEOUT_SECS;
use clap::Parser;
use std::path::PathBuf;

/// Parses a groupId:artifactId:version triple
fn parse_coordinates(value: &str) -> Result<Coordinates, String> {
    value.parse()
}

/// Parses a dependency resolution scope name
fn parse_scope(value: &str) -> Result<Scope, String> {
    value.parse()
}

/// Specializes dependency archives down to the classes a project uses
#[derive(Parser, Debug, Clone)]
#[command(name = "depspec", version)]
#[command(about = "Specializes dependency archives down to the classes a project uses")]
pub struct CliArgs {
    /// Project directory to process
    #[arg(default_value = ".")]
    pub project_dir: PathBuf,

    /// Build directory (default: <project-dir>/target)
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Directory holding extracted dependency class trees (default: <build-dir>/dependency)
    #[arg(long)]
    pub deps_dir: Option<PathBuf>,

    /// Staging directory for specialized archives (default: <build-dir>/libs-specialized)
    #[arg(long)]
    pub staging_dir: Option<PathBuf>,

    /// Dependency manifest to rewrite (default: <project-dir>/pom-debloated.xml)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Class-usage report produced by the analyzer (default: <build-dir>/usage-report.json)
    #[arg(long)]
    pub usage_report: Option<PathBuf>,

    /// Specialize only this groupId:artifactId:version (repeatable; default: all analyzed)
    #[arg(long, value_parser = parse_coordinates)]
    pub specialize: Vec<Coordinates>,

    /// Skip dependencies declared with this scope (repeatable)
    #[arg(long, value_parser = parse_scope)]
    pub ignore_scope: Vec<Scope>,

    /// Write one manifest substituting every specialized dependency
    #[arg(long)]
    pub single_manifest: bool,

    /// Write one manifest per specialized dependency
    #[arg(long)]
    pub manifest_per_dependency: bool,

    /// Write one manifest per subset of the specialized dependencies
    #[arg(long)]
    pub all_combinations: bool,

    /// Leave out the zero-substitution variant in --all-combinations mode
    #[arg(long)]
    pub skip_empty_combination: bool,

    /// Group id specialized artifacts are published under
    #[arg(long, default_value = SPECIALIZED_GROUP_ID)]
    pub specialized_group: String,

    /// Artifact repository URL to deploy to (default: file:<staging-dir>)
    #[arg(long)]
    pub repo_url: Option<String>,

    /// Seconds a deploy command may run before it is aborted
    #[arg(long, default_value_t = DEFAULT_PUBLISH_TIMEOUT_SECS)]
    pub publish_timeout: u64,

    /// Skip execution entirely
    #[arg(long)]
    pub skip: bool,

    /// Dry run mode - build archives locally without publishing or writing manifests
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Build directory, defaulting next to the project
    pub fn resolved_build_dir(&self) -> PathBuf {
        self.build_dir
            .clone()
            .unwrap_or_else(|| self.project_dir.join("target"))
    }

    /// Directory of extracted dependency class trees
    pub fn resolved_deps_dir(&self) -> PathBuf {
        self.deps_dir
            .clone()
            .unwrap_or_else(|| self.resolved_build_dir().join("dependency"))
    }

    /// Staging directory specialized archives are packed into
    pub fn resolved_staging_dir(&self) -> PathBuf {
        self.staging_dir
            .clone()
            .unwrap_or_else(|| self.resolved_build_dir().join("libs-specialized"))
    }

    /// Dependency manifest the rewrite phase reads
    pub fn resolved_manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| self.project_dir.join("pom-debloated.xml"))
    }

    /// Class-usage report the run is driven by
    pub fn resolved_usage_report_path(&self) -> PathBuf {
        self.usage_report
            .clone()
            .unwrap_or_else(|| self.resolved_build_dir().join("usage-report.json"))
    }

    /// Repository URL deploys go to
    pub fn resolved_repo_url(&self) -> String {
        self.repo_url
            .clone()
            .unwrap_or_else(|| format!("file:{}", self.resolved_staging_dir().display()))
    }

    /// Returns true if a coordinate filter was given
    pub fn has_coordinate_filter(&self) -> bool {
        !self.specialize.is_empty()
    }

    /// Returns true if these coordinates should be specialized
    pub fn should_specialize(&self, coordinates: &Coordinates) -> bool {
        !self.has_coordinate_filter() || self.specialize.iter().any(|c| c == coordinates)
    }

    /// Returns true if dependencies with this scope are skipped
    pub fn is_ignored_scope(&self, scope: Scope) -> bool {
        self.ignore_scope.contains(&scope)
    }

    /// Requested manifest generation modes, in a fixed order
    pub fn generation_modes(&self) -> Vec<GenerationMode> {
        let mut modes = Vec::new();
        if self.single_manifest {
            modes.push(GenerationMode::Single);
        }
        if self.manifest_per_dependency {
            modes.push(GenerationMode::PerDependency);
        }
        if self.all_combinations {
            modes.push(GenerationMode::AllCombinations);
        }
        modes
    }

    /// Returns true if any manifest generation mode was requested
    pub fn wants_manifests(&self) -> bool {
        self.single_manifest || self.manifest_per_dependency || self.all_combinations
    }
}
