//! Per-dependency class usage sets

use super::ClassName;
use std::collections::BTreeSet;

/// The analyzer's verdict for one dependency: every type the archive
/// declares and the subset the project actually references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassUsage {
    all_types: BTreeSet<ClassName>,
    used_types: BTreeSet<ClassName>,
}

impl ClassUsage {
    /// Builds a usage pair. Used types are intersected with the declared
    /// set so foreign input cannot report a used type the archive lacks.
    pub fn new(all_types: BTreeSet<ClassName>, used_types: BTreeSet<ClassName>) -> Self {
        let used_types = used_types.intersection(&all_types).cloned().collect();
        Self {
            all_types,
            used_types,
        }
    }

    pub fn all_types(&self) -> &BTreeSet<ClassName> {
        &self.all_types
    }

    pub fn used_types(&self) -> &BTreeSet<ClassName> {
        &self.used_types
    }

    /// Declared types the project never references
    pub fn unused_types(&self) -> BTreeSet<ClassName> {
        self.all_types.difference(&self.used_types).cloned().collect()
    }

    pub fn total_count(&self) -> usize {
        self.all_types.len()
    }

    pub fn used_count(&self) -> usize {
        self.used_types.len()
    }

    /// Every declared type is referenced, so there is nothing to remove
    pub fn is_fully_used(&self) -> bool {
        self.used_types.len() == self.all_types.len()
    }

    /// No declared type is referenced at all
    pub fn is_fully_unused(&self) -> bool {
        self.used_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> BTreeSet<ClassName> {
        values.iter().map(|value| ClassName::new(*value)).collect()
    }

    #[test]
    fn test_unused_is_all_minus_used() {
        let usage = ClassUsage::new(names(&["a.A", "a.B", "a.C"]), names(&["a.B"]));
        assert_eq!(usage.unused_types(), names(&["a.A", "a.C"]));
        assert_eq!(usage.total_count(), 3);
        assert_eq!(usage.used_count(), 1);
    }

    #[test]
    fn test_used_and_unused_are_disjoint() {
        let usage = ClassUsage::new(names(&["a.A", "a.B", "a.C"]), names(&["a.A", "a.C"]));
        let unused = usage.unused_types();
        assert!(usage.used_types().is_disjoint(&unused));
        assert_eq!(usage.used_count() + unused.len(), usage.total_count());
    }

    #[test]
    fn test_foreign_used_types_are_dropped() {
        let usage = ClassUsage::new(names(&["a.A", "a.B"]), names(&["a.A", "x.Unknown"]));
        assert_eq!(usage.used_types(), &names(&["a.A"]));
        assert_eq!(usage.unused_types(), names(&["a.B"]));
    }

    #[test]
    fn test_fully_used() {
        let usage = ClassUsage::new(names(&["a.A", "a.B"]), names(&["a.A", "a.B"]));
        assert!(usage.is_fully_used());
        assert!(!usage.is_fully_unused());
        assert!(usage.unused_types().is_empty());
    }

    #[test]
    fn test_fully_unused() {
        let usage = ClassUsage::new(names(&["a.A", "a.B"]), BTreeSet::new());
        assert!(usage.is_fully_unused());
        assert!(!usage.is_fully_used());
        assert_eq!(usage.unused_types(), names(&["a.A", "a.B"]));
    }

    #[test]
    fn test_empty_declaration() {
        let usage = ClassUsage::new(BTreeSet::new(), BTreeSet::new());
        assert!(usage.is_fully_unused());
        assert!(usage.is_fully_used());
        assert_eq!(usage.total_count(), 0);
    }
}
