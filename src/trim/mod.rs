//! Unused-type removal from extracted dependency trees
//!
//! This module contains:
//! - TypePruner: copies a class tree and deletes unused class files
//! - Empty-directory sweep: removes directories the pruning emptied

mod empty_dirs;
mod pruner;

pub use empty_dirs::{classify_effectively_empty, sweep, SweepOutcome};
pub use pruner::{PruneOutcome, TypePruner};
