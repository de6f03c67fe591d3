//! Class-file removal from extracted dependency trees

use crate::domain::ClassName;
use crate::error::TrimError;
use crate::trim::empty_dirs;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Counters and per-file failures from one prune
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    /// Files copied into the pruned tree
    pub copied_files: usize,
    /// Unused class files deleted from the pruned tree
    pub removed_files: usize,
    /// Unused types whose class file was not present in the source tree
    pub missing_files: usize,
    /// Directories deleted because pruning emptied them
    pub removed_dirs: usize,
    /// Per-file failures that did not stop the prune
    pub errors: Vec<String>,
}

impl PruneOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Copies an extracted class tree and deletes the class files of unused
/// types from the copy. Non-class resources are carried over untouched.
#[derive(Debug, Default)]
pub struct TypePruner;

impl TypePruner {
    pub fn new() -> Self {
        Self
    }

    /// Prunes `source_dir` into `dest_dir`. The source tree is never
    /// modified. An existing destination is replaced.
    pub fn prune(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        unused: &BTreeSet<ClassName>,
    ) -> Result<PruneOutcome, TrimError> {
        if !source_dir.is_dir() {
            return Err(TrimError::source_missing(source_dir));
        }
        if dest_dir.exists() {
            fs::remove_dir_all(dest_dir).map_err(|e| TrimError::delete_failed(dest_dir, e))?;
        }

        let mut outcome = PruneOutcome::default();
        self.copy_tree(source_dir, dest_dir, &mut outcome)?;

        for class_name in unused {
            let target = dest_dir.join(class_name.as_class_file_path());
            match fs::remove_file(&target) {
                Ok(()) => outcome.removed_files += 1,
                Err(error) if error.kind() == io::ErrorKind::NotFound => {
                    outcome.missing_files += 1;
                }
                Err(error) => outcome
                    .errors
                    .push(format!("failed to remove {}: {}", target.display(), error)),
            }
        }

        let sweep = empty_dirs::sweep(dest_dir);
        outcome.removed_dirs = sweep.removed_dirs;
        outcome.errors.extend(sweep.errors);
        Ok(outcome)
    }

    fn copy_tree(
        &self,
        source: &Path,
        dest: &Path,
        outcome: &mut PruneOutcome,
    ) -> Result<(), TrimError> {
        fs::create_dir_all(dest).map_err(|e| TrimError::create_dir_failed(dest, e))?;
        for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    outcome
                        .errors
                        .push(format!("failed to walk {}: {}", source.display(), error));
                    continue;
                }
            };
            let relative = match entry.path().strip_prefix(source) {
                Ok(relative) => relative,
                Err(error) => {
                    outcome.errors.push(format!(
                        "failed to relativize {}: {}",
                        entry.path().display(),
                        error
                    ));
                    continue;
                }
            };
            let target = dest.join(relative);
            if entry.file_type().is_dir() {
                if let Err(error) = fs::create_dir_all(&target) {
                    outcome
                        .errors
                        .push(format!("failed to create {}: {}", target.display(), error));
                }
            } else {
                match fs::copy(entry.path(), &target) {
                    Ok(_) => outcome.copied_files += 1,
                    Err(error) => outcome.errors.push(format!(
                        "failed to copy {}: {}",
                        entry.path().display(),
                        error
                    )),
                }
            }
        }
        Ok(())
    }
}
