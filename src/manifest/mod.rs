//! Dependency manifest rewriting
//!
//! This module provides functionality to:
//! - Load and parse pom-style dependency manifests
//! - Substitute specialized coordinates into dependency entries
//! - Enumerate and write manifest variants per generation mode

mod combinations;
mod pom;

pub use combinations::{
    enumerate, generate_manifests, specialized_manifest_path, Combination,
    MAX_POWER_SET_DEPENDENCIES,
};
pub use pom::PomDocument;
