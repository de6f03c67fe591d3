//! Empty-directory sweep after class removal
//!
//! Runs in two passes: a read-only pass marks every directory that is
//! effectively empty (contains nothing but other effectively empty
//! directories), then a delete pass removes the marked set deepest first.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Counters and per-directory failures from one sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    pub removed_dirs: usize,
    pub errors: Vec<String>,
}

/// Marks every effectively empty directory under (and including) `root`.
/// Does not modify the tree.
pub fn classify_effectively_empty(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
    let mut marked = BTreeSet::new();
    classify_dir(root, &mut marked)?;
    Ok(marked)
}

fn classify_dir(dir: &Path, marked: &mut BTreeSet<PathBuf>) -> io::Result<bool> {
    let mut empty = true;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            if !classify_dir(&path, marked)? {
                empty = false;
            }
        } else {
            empty = false;
        }
    }
    if empty {
        marked.insert(dir.to_path_buf());
    }
    Ok(empty)
}

/// Removes every effectively empty directory under (and including) `root`.
/// Failures are recorded per directory and do not stop the sweep.
pub fn sweep(root: &Path) -> SweepOutcome {
    let mut outcome = SweepOutcome::default();
    let marked = match classify_effectively_empty(root) {
        Ok(marked) => marked,
        Err(error) => {
            outcome
                .errors
                .push(format!("failed to scan {}: {}", root.display(), error));
            return outcome;
        }
    };
    // Parents sort before their children, so reverse order deletes
    // children first
    for dir in marked.iter().rev() {
        match fs::remove_dir(dir) {
            Ok(()) => outcome.removed_dirs += 1,
            Err(error) => outcome
                .errors
                .push(format!("failed to remove {}: {}", dir.display(), error)),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn make_dirs(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    #[test]
    fn test_classify_marks_nested_empty_chain() {
        let dir = TempDir::new().unwrap();
        make_dirs(dir.path(), "com/example/util");

        let marked = classify_effectively_empty(dir.path()).unwrap();
        assert!(marked.contains(&dir.path().join("com")));
        assert!(marked.contains(&dir.path().join("com/example")));
        assert!(marked.contains(&dir.path().join("com/example/util")));
    }

    #[test]
    fn test_classify_does_not_modify_the_tree() {
        let dir = TempDir::new().unwrap();
        let deepest = make_dirs(dir.path(), "a/b/c");

        classify_effectively_empty(dir.path()).unwrap();
        assert!(deepest.is_dir());
    }

    #[test]
    fn test_classify_skips_directories_holding_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "com/example/A.class");
        make_dirs(dir.path(), "com/example/empty");

        let marked = classify_effectively_empty(dir.path()).unwrap();
        assert!(marked.contains(&dir.path().join("com/example/empty")));
        assert!(!marked.contains(&dir.path().join("com/example")));
        assert!(!marked.contains(&dir.path().join("com")));
        assert!(!marked.contains(&dir.path().to_path_buf()));
    }

    #[test]
    fn test_sweep_removes_nested_empty_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "com/example/A.class");
        make_dirs(dir.path(), "com/example/unused/deep");

        let outcome = sweep(dir.path());
        assert_eq!(outcome.removed_dirs, 2);
        assert!(outcome.errors.is_empty());
        assert!(!dir.path().join("com/example/unused").exists());
        assert!(dir.path().join("com/example/A.class").exists());
    }

    #[test]
    fn test_sweep_collapses_chain_emptied_bottom_up() {
        let dir = TempDir::new().unwrap();
        let root = make_dirs(dir.path(), "tree");
        make_dirs(&root, "a/b/c");
        touch(dir.path(), "keep.txt");

        let outcome = sweep(&root);
        // a, a/b, a/b/c, and the tree root itself
        assert_eq!(outcome.removed_dirs, 4);
        assert!(!root.exists());
    }

    #[test]
    fn test_sweep_leaves_populated_tree_alone() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "com/example/A.class");
        touch(dir.path(), "META-INF/MANIFEST.MF");

        let outcome = sweep(dir.path());
        assert_eq!(outcome.removed_dirs, 0);
        assert!(dir.path().join("com/example").is_dir());
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "com/A.class");
        make_dirs(dir.path(), "org/empty");

        let first = sweep(dir.path());
        let second = sweep(dir.path());
        assert_eq!(first.removed_dirs, 2);
        assert_eq!(second.removed_dirs, 0);
    }
}
