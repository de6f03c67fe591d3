//! Class-usage report loading
//!
//! The usage report is the analyzer handoff: for every resolved dependency
//! it lists the types the archive declares and the subset the project
//! actually references. Everything downstream works from this report.

use crate::domain::{ClassName, ClassUsage, Coordinates, Dependency, Scope};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// One dependency entry as serialized in the usage report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyUsage {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default)]
    pub scope: Scope,
    pub archive: String,
    #[serde(default)]
    pub all_types: Vec<String>,
    #[serde(default)]
    pub used_types: Vec<String>,
}

/// Top-level shape of the usage report file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub dependencies: Vec<DependencyUsage>,
}

/// One analyzed dependency with its normalized usage sets
#[derive(Debug, Clone)]
pub struct AnalyzedDependency {
    pub dependency: Dependency,
    pub usage: ClassUsage,
}

/// In-memory index over the usage report, ordered by coordinates so runs
/// process dependencies in a stable order
#[derive(Debug, Clone, Default)]
pub struct UsageIndex {
    entries: Vec<AnalyzedDependency>,
}

impl UsageIndex {
    /// Loads and parses the usage report at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::usage_report_not_found(path));
        }
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::usage_report_read(path, e))?;
        let report: UsageReport = serde_json::from_str(&content)
            .map_err(|e| ConfigError::usage_report_parse(path, e.to_string()))?;
        Ok(Self::from_report(report))
    }

    /// Builds the index from an already parsed report
    pub fn from_report(report: UsageReport) -> Self {
        let mut entries: Vec<AnalyzedDependency> = report
            .dependencies
            .into_iter()
            .map(|entry| {
                let coordinates =
                    Coordinates::new(entry.group_id, entry.artifact_id, entry.version);
                let dependency = Dependency::new(coordinates, entry.scope, entry.archive);
                let all_types: BTreeSet<ClassName> =
                    entry.all_types.into_iter().map(ClassName::new).collect();
                let used_types: BTreeSet<ClassName> =
                    entry.used_types.into_iter().map(ClassName::new).collect();
                AnalyzedDependency {
                    dependency,
                    usage: ClassUsage::new(all_types, used_types),
                }
            })
            .collect();
        entries.sort_by(|a, b| a.dependency.coordinates.cmp(&b.dependency.coordinates));
        Self { entries }
    }

    pub fn entries(&self) -> &[AnalyzedDependency] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the analyzer produced data for these coordinates
    pub fn contains(&self, coordinates: &Coordinates) -> bool {
        self.entries
            .iter()
            .any(|entry| &entry.dependency.coordinates == coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_report_json() -> &'static str {
        r#"{
            "dependencies": [
                {
                    "groupId": "com.example",
                    "artifactId": "z-lib",
                    "version": "2.0.0",
                    "scope": "test",
                    "archive": "z-lib-2.0.0.jar",
                    "allTypes": ["z.A", "z.B"],
                    "usedTypes": ["z.A"]
                },
                {
                    "groupId": "com.example",
                    "artifactId": "a-lib",
                    "version": "1.0.0",
                    "archive": "a-lib-1.0.0.jar",
                    "allTypes": ["a.A", "a.B", "a.C"],
                    "usedTypes": ["a.B", "x.NotDeclared"]
                }
            ]
        }"#
    }

    fn parse_sample() -> UsageIndex {
        let report: UsageReport = serde_json::from_str(sample_report_json()).unwrap();
        UsageIndex::from_report(report)
    }

    #[test]
    fn test_parses_camel_case_fields() {
        let report: UsageReport = serde_json::from_str(sample_report_json()).unwrap();
        assert_eq!(report.dependencies.len(), 2);
        assert_eq!(report.dependencies[0].group_id, "com.example");
        assert_eq!(report.dependencies[0].all_types, vec!["z.A", "z.B"]);
    }

    #[test]
    fn test_scope_defaults_to_compile() {
        let index = parse_sample();
        let a_lib = &index.entries()[0];
        assert_eq!(a_lib.dependency.coordinates.artifact_id, "a-lib");
        assert_eq!(a_lib.dependency.scope, Scope::Compile);
    }

    #[test]
    fn test_entries_are_sorted_by_coordinates() {
        let index = parse_sample();
        let artifacts: Vec<_> = index
            .entries()
            .iter()
            .map(|entry| entry.dependency.coordinates.artifact_id.as_str())
            .collect();
        assert_eq!(artifacts, vec!["a-lib", "z-lib"]);
    }

    #[test]
    fn test_undeclared_used_types_are_dropped() {
        let index = parse_sample();
        let a_lib = &index.entries()[0];
        assert_eq!(a_lib.usage.used_count(), 1);
        assert_eq!(a_lib.usage.total_count(), 3);
        assert_eq!(a_lib.usage.unused_types().len(), 2);
    }

    #[test]
    fn test_contains_known_coordinates() {
        let index = parse_sample();
        assert!(index.contains(&Coordinates::new("com.example", "a-lib", "1.0.0")));
        assert!(!index.contains(&Coordinates::new("com.example", "a-lib", "9.9.9")));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage-report.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(sample_report_json().as_bytes()).unwrap();

        let index = UsageIndex::load(&path).unwrap();
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let error = UsageIndex::load(&path).unwrap_err();
        assert!(error.to_string().contains("usage report not found"));
    }

    #[test]
    fn test_load_malformed_json_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage-report.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"{ not json").unwrap();

        let error = UsageIndex::load(&path).unwrap_err();
        let msg = error.to_string();
        assert!(msg.contains("failed to parse usage report"));
        assert!(msg.contains("usage-report.json"));
    }

    #[test]
    fn test_load_unknown_scope_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage-report.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(
            br#"{"dependencies": [{"groupId": "g", "artifactId": "a", "version": "1", "scope": "shadow", "archive": "a-1.jar"}]}"#,
        )
        .unwrap();

        let error = UsageIndex::load(&path).unwrap_err();
        assert!(error.to_string().contains("failed to parse usage report"));
    }

    #[test]
    fn test_missing_type_lists_default_to_empty() {
        let report: UsageReport = serde_json::from_str(
            r#"{"dependencies": [{"groupId": "g", "artifactId": "a", "version": "1", "archive": "a-1.jar"}]}"#,
        )
        .unwrap();
        let index = UsageIndex::from_report(report);
        assert!(index.entries()[0].usage.is_fully_unused());
        assert_eq!(index.entries()[0].usage.total_count(), 0);
    }
}
