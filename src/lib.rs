//! depspec - Dependency archive specializer library
//!
//! This library provides the core functionality for specializing project
//! dependencies down to the classes the project actually uses:
//! - Pruning unused types from extracted dependency class trees
//! - Packing pruned trees into deterministic archives
//! - Publishing specialized artifacts under a dedicated group id
//! - Rewriting dependency manifests against the specialized coordinates

pub mod archive;
pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod publish;
pub mod specializer;
pub mod trim;
pub mod usage;
