//! Specialization orchestrator
//!
//! Drives the whole workflow: load the usage index, fold over the analyzed
//! dependencies producing one result each, then generate the requested
//! manifest variants once every dependency is settled.

use crate::archive;
use crate::cli::CliArgs;
use crate::domain::{
    Coordinates, Dependency, RunSummary, Scope, SkipReason, SpecializeResult,
    SpecializedDependency,
};
use crate::error::{AppError, ConfigError};
use crate::manifest::{self, PomDocument};
use crate::progress::Progress;
use crate::publish::{ArtifactPublisher, DeployCommandPublisher};
use crate::trim::TypePruner;
use crate::usage::{AnalyzedDependency, UsageIndex};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Directory under the build dir where pruned class trees are materialized
const PRUNED_TREES_DIR: &str = "dependency-specialized";

/// Coordinates the prune, pack, publish, and manifest phases of one run
pub struct Specializer {
    args: CliArgs,
    publisher: Box<dyn ArtifactPublisher>,
}

impl Specializer {
    pub fn new(args: CliArgs) -> Self {
        let timeout = Duration::from_secs(args.publish_timeout);
        Self {
            args,
            publisher: Box::new(DeployCommandPublisher::new(timeout)),
        }
    }

    /// Creates an orchestrator with a custom publisher (for testing)
    pub fn with_publisher(args: CliArgs, publisher: Box<dyn ArtifactPublisher>) -> Self {
        Self { args, publisher }
    }

    /// Runs the full specialization workflow
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        let started = Instant::now();
        let mut summary = RunSummary::new(self.args.dry_run);
        let mut progress = Progress::new(!self.args.quiet);

        progress.spinner("Loading usage report...");
        let index = UsageIndex::load(&self.args.resolved_usage_report_path())?;
        progress.finish_and_clear();

        let self_coordinates = self.detect_self_coordinates()?;
        self.create_output_dirs()?;

        progress.start(index.len() as u64, "Specializing dependencies");
        let pruner = TypePruner::new();
        for analyzed in index.entries() {
            progress.set_message(&format!("Specializing {}", analyzed.dependency.coordinates));
            let result = self
                .specialize_one(&pruner, analyzed, self_coordinates.as_ref())
                .await;
            summary.add_result(result);
            progress.inc();
        }
        progress.finish_and_clear();

        // Requested coordinates the analyzer never saw still get a result
        // so the summary accounts for every selection
        for coordinates in &self.args.specialize {
            if !index.contains(coordinates) {
                summary.add_result(SpecializeResult::skipped(
                    Dependency::new(coordinates.clone(), Scope::default(), PathBuf::new()),
                    SkipReason::NoUsageData,
                ));
            }
        }

        if self.args.wants_manifests() && !self.args.dry_run {
            progress.spinner("Generating manifest variants...");
            let specialized = summary.specialized_dependencies();
            let outcomes = manifest::generate_manifests(
                &self.args.resolved_manifest_path(),
                &self.args.generation_modes(),
                &specialized,
                !self.args.skip_empty_combination,
            )?;
            for outcome in outcomes {
                summary.add_manifest(outcome);
            }
            progress.finish_and_clear();
        }

        summary.set_elapsed(started.elapsed());
        Ok(summary)
    }

    /// The project's own coordinates, read from the manifest. When no
    /// manifest mode was requested a missing or bad manifest only disables
    /// the self-reference check instead of failing the run.
    fn detect_self_coordinates(&self) -> Result<Option<Coordinates>, AppError> {
        let manifest_path = self.args.resolved_manifest_path();
        if self.args.wants_manifests() && !self.args.dry_run {
            let document = PomDocument::load(&manifest_path)?;
            return Ok(Some(document.project_coordinates()?));
        }
        match PomDocument::load(&manifest_path) {
            Ok(document) => Ok(document.project_coordinates().ok()),
            Err(_) => Ok(None),
        }
    }

    fn create_output_dirs(&self) -> Result<(), ConfigError> {
        let staging_dir = self.args.resolved_staging_dir();
        fs::create_dir_all(&staging_dir)
            .map_err(|e| ConfigError::output_dir_create(&staging_dir, e))?;
        let pruned_root = self.args.resolved_build_dir().join(PRUNED_TREES_DIR);
        fs::create_dir_all(&pruned_root)
            .map_err(|e| ConfigError::output_dir_create(&pruned_root, e))?;
        Ok(())
    }

    async fn specialize_one(
        &self,
        pruner: &TypePruner,
        analyzed: &AnalyzedDependency,
        self_coordinates: Option<&Coordinates>,
    ) -> SpecializeResult {
        let dependency = &analyzed.dependency;
        let usage = &analyzed.usage;

        if !self.args.should_specialize(&dependency.coordinates) {
            return SpecializeResult::skipped(dependency.clone(), SkipReason::NotSelected);
        }
        if self.args.is_ignored_scope(dependency.scope) {
            return SpecializeResult::skipped(
                dependency.clone(),
                SkipReason::IgnoredScope(dependency.scope),
            );
        }
        if self_coordinates == Some(&dependency.coordinates) {
            return SpecializeResult::skipped(dependency.clone(), SkipReason::SelfReference);
        }
        if usage.is_fully_unused() {
            return SpecializeResult::skipped(dependency.clone(), SkipReason::FullyUnused);
        }
        if usage.is_fully_used() {
            return SpecializeResult::skipped(dependency.clone(), SkipReason::FullyUsed);
        }

        match self.build_and_publish(pruner, analyzed).await {
            Ok((specialized, removed_types)) => SpecializeResult::specialized(
                dependency.clone(),
                specialized,
                removed_types,
                usage.total_count(),
            ),
            Err(error) => SpecializeResult::failed(dependency.clone(), error.to_string()),
        }
    }

    async fn build_and_publish(
        &self,
        pruner: &TypePruner,
        analyzed: &AnalyzedDependency,
    ) -> Result<(SpecializedDependency, usize), AppError> {
        let dependency = &analyzed.dependency;
        let stem = dependency.archive_stem();
        let source_dir = self.args.resolved_deps_dir().join(&stem);
        let pruned_dir = self
            .args
            .resolved_build_dir()
            .join(PRUNED_TREES_DIR)
            .join(&stem);

        let unused = analyzed.usage.unused_types();
        let outcome = pruner.prune(&source_dir, &pruned_dir, &unused)?;
        if self.args.verbose {
            for error in &outcome.errors {
                eprintln!("  {}: {}", dependency.coordinates, error);
            }
            eprintln!(
                "  {}: removed {} of {} types, swept {} directories",
                dependency.coordinates,
                outcome.removed_files,
                analyzed.usage.total_count(),
                outcome.removed_dirs
            );
        }

        let archive_path = self
            .args
            .resolved_staging_dir()
            .join(format!("{}.jar", stem));
        let archive_summary = archive::write_archive(&pruned_dir, &archive_path)?;
        if self.args.verbose {
            eprintln!(
                "  {}: packed {} entries into {}",
                dependency.coordinates,
                archive_summary.total_entries(),
                archive_path.display()
            );
        }

        let specialized =
            SpecializedDependency::remap(&dependency.coordinates, &self.args.specialized_group);
        if !self.args.dry_run {
            self.publisher
                .publish(
                    &archive_path,
                    &specialized.specialized,
                    &self.args.resolved_repo_url(),
                )
                .await?;
        }
        Ok((specialized, outcome.removed_files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use crate::error::PublishError;
    use async_trait::async_trait;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingPublisher {
        calls: Arc<Mutex<Vec<(PathBuf, Coordinates, String)>>>,
        fail_artifacts: Vec<String>,
    }

    impl RecordingPublisher {
        fn failing_for(artifact: &str) -> Self {
            Self {
                calls: Arc::default(),
                fail_artifacts: vec![artifact.to_string()],
            }
        }

        fn calls_handle(&self) -> Arc<Mutex<Vec<(PathBuf, Coordinates, String)>>> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl ArtifactPublisher for RecordingPublisher {
        async fn publish(
            &self,
            file: &Path,
            coordinates: &Coordinates,
            repo_url: &str,
        ) -> Result<(), PublishError> {
            self.calls.lock().unwrap().push((
                file.to_path_buf(),
                coordinates.clone(),
                repo_url.to_string(),
            ));
            if self.fail_artifacts.contains(&coordinates.artifact_id) {
                return Err(PublishError::command_failed(
                    coordinates.to_string(),
                    "exit status: 1",
                    "transfer failed",
                ));
            }
            Ok(())
        }
    }

    fn write_file(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap().write_all(content).unwrap();
    }

    fn write_usage_report(project: &Path, entries: &[serde_json::Value]) {
        let report = serde_json::json!({ "dependencies": entries });
        write_file(
            project,
            "target/usage-report.json",
            serde_json::to_string_pretty(&report).unwrap().as_bytes(),
        );
    }

    fn usage_entry(artifact: &str, all: &[&str], used: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "groupId": "com.example",
            "artifactId": artifact,
            "version": "1.0.0",
            "scope": "compile",
            "archive": format!("{}-1.0.0.jar", artifact),
            "allTypes": all,
            "usedTypes": used,
        })
    }

    fn extracted_tree(project: &Path, stem: &str, classes: &[&str]) {
        for class in classes {
            let relative = format!(
                "target/dependency/{}/{}.class",
                stem,
                class.replace('.', "/")
            );
            write_file(project, &relative, b"bytecode");
        }
    }

    fn quiet_args(project: &Path) -> CliArgs {
        use clap::Parser;
        CliArgs::parse_from([
            "depspec",
            project.to_str().unwrap(),
            "--quiet",
        ])
    }

    #[tokio::test]
    async fn test_run_specializes_partially_used_dependency() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_usage_report(
            project,
            &[usage_entry("my-lib", &["a.A", "a.B", "a.C"], &["a.A"])],
        );
        extracted_tree(project, "my-lib-1.0.0", &["a.A", "a.B", "a.C"]);

        let publisher = RecordingPublisher::default();
        let calls = publisher.calls_handle();
        let specializer =
            Specializer::with_publisher(quiet_args(project), Box::new(publisher));
        let summary = specializer.run().await.unwrap();

        assert_eq!(summary.specialized_count(), 1);
        assert_eq!(summary.failed_count(), 0);
        assert!(!summary.has_failures());

        let pruned = project.join("target/dependency-specialized/my-lib-1.0.0");
        assert!(pruned.join("a/A.class").exists());
        assert!(!pruned.join("a/B.class").exists());

        let staged = project.join("target/libs-specialized/my-lib-1.0.0.jar");
        assert!(staged.is_file());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, staged);
        assert_eq!(
            calls[0].1,
            Coordinates::new("io.depspec.spl", "my-lib", "1.0.0")
        );
        assert!(calls[0].2.starts_with("file:"));
    }

    #[tokio::test]
    async fn test_run_skips_fully_used_and_fully_unused() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_usage_report(
            project,
            &[
                usage_entry("all-used", &["a.A"], &["a.A"]),
                usage_entry("none-used", &["b.B"], &[]),
            ],
        );

        let publisher = RecordingPublisher::default();
        let calls = publisher.calls_handle();
        let specializer =
            Specializer::with_publisher(quiet_args(project), Box::new(publisher));
        let summary = specializer.run().await.unwrap();

        assert_eq!(summary.specialized_count(), 0);
        assert_eq!(summary.skipped_count(), 2);
        let reasons: Vec<_> = summary
            .skips()
            .map(|result| match result {
                SpecializeResult::Skipped { reason, .. } => reason.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert!(reasons.contains(&SkipReason::FullyUsed));
        assert!(reasons.contains(&SkipReason::FullyUnused));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_respects_coordinate_filter() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_usage_report(
            project,
            &[
                usage_entry("wanted", &["a.A", "a.B"], &["a.A"]),
                usage_entry("ignored", &["b.A", "b.B"], &["b.A"]),
            ],
        );
        extracted_tree(project, "wanted-1.0.0", &["a.A", "a.B"]);

        use clap::Parser;
        let args = CliArgs::parse_from([
            "depspec",
            project.to_str().unwrap(),
            "--quiet",
            "--specialize",
            "com.example:wanted:1.0.0",
        ]);
        let specializer =
            Specializer::with_publisher(args, Box::new(RecordingPublisher::default()));
        let summary = specializer.run().await.unwrap();

        assert_eq!(summary.specialized_count(), 1);
        let skipped: Vec<_> = summary.skips().collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].coordinates().artifact_id, "ignored");
    }

    #[tokio::test]
    async fn test_run_reports_unknown_selection_as_no_usage_data() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_usage_report(project, &[usage_entry("known", &["a.A"], &["a.A"])]);

        use clap::Parser;
        let args = CliArgs::parse_from([
            "depspec",
            project.to_str().unwrap(),
            "--quiet",
            "--specialize",
            "com.example:phantom:1.0.0",
        ]);
        let specializer =
            Specializer::with_publisher(args, Box::new(RecordingPublisher::default()));
        let summary = specializer.run().await.unwrap();

        let phantom: Vec<_> = summary
            .results
            .iter()
            .filter(|result| result.coordinates().artifact_id == "phantom")
            .collect();
        assert_eq!(phantom.len(), 1);
        assert!(matches!(
            phantom[0],
            SpecializeResult::Skipped {
                reason: SkipReason::NoUsageData,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_run_skips_ignored_scopes() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_usage_report(
            project,
            &[serde_json::json!({
                "groupId": "com.example",
                "artifactId": "test-helper",
                "version": "1.0.0",
                "scope": "test",
                "archive": "test-helper-1.0.0.jar",
                "allTypes": ["t.T", "t.U"],
                "usedTypes": ["t.T"],
            })],
        );

        use clap::Parser;
        let args = CliArgs::parse_from([
            "depspec",
            project.to_str().unwrap(),
            "--quiet",
            "--ignore-scope",
            "test",
        ]);
        let specializer =
            Specializer::with_publisher(args, Box::new(RecordingPublisher::default()));
        let summary = specializer.run().await.unwrap();

        assert_eq!(summary.skipped_count(), 1);
        assert!(matches!(
            summary.results[0],
            SpecializeResult::Skipped {
                reason: SkipReason::IgnoredScope(Scope::Test),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_run_skips_the_project_itself() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_file(
            project,
            "pom-debloated.xml",
            br#"<project>
  <groupId>com.example</groupId>
  <artifactId>demo-app</artifactId>
  <version>0.1.0</version>
</project>"#,
        );
        write_usage_report(
            project,
            &[serde_json::json!({
                "groupId": "com.example",
                "artifactId": "demo-app",
                "version": "0.1.0",
                "archive": "demo-app-0.1.0.jar",
                "allTypes": ["d.D", "d.E"],
                "usedTypes": ["d.D"],
            })],
        );

        let specializer = Specializer::with_publisher(
            quiet_args(project),
            Box::new(RecordingPublisher::default()),
        );
        let summary = specializer.run().await.unwrap();

        assert!(matches!(
            summary.results[0],
            SpecializeResult::Skipped {
                reason: SkipReason::SelfReference,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_failed_publish_is_isolated_per_dependency() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_usage_report(
            project,
            &[
                usage_entry("bad-lib", &["a.A", "a.B"], &["a.A"]),
                usage_entry("good-lib", &["b.A", "b.B"], &["b.A"]),
            ],
        );
        extracted_tree(project, "bad-lib-1.0.0", &["a.A", "a.B"]);
        extracted_tree(project, "good-lib-1.0.0", &["b.A", "b.B"]);

        let specializer = Specializer::with_publisher(
            quiet_args(project),
            Box::new(RecordingPublisher::failing_for("bad-lib")),
        );
        let summary = specializer.run().await.unwrap();

        assert_eq!(summary.specialized_count(), 1);
        assert_eq!(summary.failed_count(), 1);
        assert!(summary.has_failures());
        let failed: Vec<_> = summary.failures().collect();
        assert_eq!(failed[0].coordinates().artifact_id, "bad-lib");
    }

    #[tokio::test]
    async fn test_missing_extracted_tree_is_a_per_dependency_failure() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_usage_report(project, &[usage_entry("ghost", &["g.G", "g.H"], &["g.G"])]);

        let specializer = Specializer::with_publisher(
            quiet_args(project),
            Box::new(RecordingPublisher::default()),
        );
        let summary = specializer.run().await.unwrap();

        assert_eq!(summary.failed_count(), 1);
        let failed: Vec<_> = summary.failures().collect();
        assert!(matches!(
            failed[0],
            SpecializeResult::Failed { message, .. }
                if message.contains("extracted class directory not found")
        ));
    }

    #[tokio::test]
    async fn test_dry_run_builds_archives_but_never_publishes() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_usage_report(project, &[usage_entry("my-lib", &["a.A", "a.B"], &["a.A"])]);
        extracted_tree(project, "my-lib-1.0.0", &["a.A", "a.B"]);

        use clap::Parser;
        let args = CliArgs::parse_from([
            "depspec",
            project.to_str().unwrap(),
            "--quiet",
            "--dry-run",
            "--single-manifest",
        ]);
        let publisher = RecordingPublisher::default();
        let calls = publisher.calls_handle();
        let specializer = Specializer::with_publisher(args, Box::new(publisher));
        let summary = specializer.run().await.unwrap();

        assert_eq!(summary.specialized_count(), 1);
        assert!(summary.dry_run);
        assert!(project
            .join("target/libs-specialized/my-lib-1.0.0.jar")
            .is_file());
        assert!(calls.lock().unwrap().is_empty());
        assert!(summary.manifests.is_empty());
        assert!(!project.join("pom-specialized.xml").exists());
    }

    #[tokio::test]
    async fn test_run_generates_manifests_after_specialization() {
        let dir = TempDir::new().unwrap();
        let project = dir.path();
        write_file(
            project,
            "pom-debloated.xml",
            br#"<project>
  <groupId>org.example</groupId>
  <artifactId>demo-app</artifactId>
  <version>0.1.0</version>
  <dependencies>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>my-lib</artifactId>
      <version>1.0.0</version>
    </dependency>
  </dependencies>
</project>"#,
        );
        write_usage_report(project, &[usage_entry("my-lib", &["a.A", "a.B"], &["a.A"])]);
        extracted_tree(project, "my-lib-1.0.0", &["a.A", "a.B"]);

        use clap::Parser;
        let args = CliArgs::parse_from([
            "depspec",
            project.to_str().unwrap(),
            "--quiet",
            "--single-manifest",
        ]);
        let specializer =
            Specializer::with_publisher(args, Box::new(RecordingPublisher::default()));
        let summary = specializer.run().await.unwrap();

        assert_eq!(summary.manifests_written(), 1);
        let manifest_path = project.join("pom-specialized.xml");
        assert!(manifest_path.is_file());
        let content = fs::read_to_string(manifest_path).unwrap();
        assert!(content.contains("io.depspec.spl"));
    }

    #[tokio::test]
    async fn test_missing_usage_report_is_fatal() {
        let dir = TempDir::new().unwrap();
        let specializer = Specializer::with_publisher(
            quiet_args(dir.path()),
            Box::new(RecordingPublisher::default()),
        );
        let error = specializer.run().await.unwrap_err();
        assert!(error.to_string().contains("usage report not found"));
    }
}
