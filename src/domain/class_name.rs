//! Fully-qualified type identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Fully-qualified class name in dot notation, e.g. `com.example.Foo`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative path of the class file inside an extracted archive tree.
    /// Package separators become directory separators.
    pub fn as_class_file_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.class", self.0.replace('.', "/")))
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
