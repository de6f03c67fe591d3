//! Core domain models for depspec
//!
//! This module contains the fundamental types used throughout the application:
//! - Coordinate triples and resolution scopes
//! - Fully-qualified class names and per-dependency usage sets
//! - Dependency information structures
//! - Specialization decision results
//! - Summary and result structures

mod class_name;
mod class_usage;
mod coordinates;
mod dependency;
mod scope;
mod specialize_result;
mod specialized;
mod summary;

pub use class_name::ClassName;
pub use class_usage::ClassUsage;
pub use coordinates::Coordinates;
pub use dependency::Dependency;
pub use scope::Scope;
pub use specialize_result::{SkipReason, SpecializeResult};
pub use specialized::{SpecializedDependency, SPECIALIZED_GROUP_ID};
pub use summary::{GenerationMode, ManifestOutcome, RunSummary};
