//! Reference-aware pruning of a Turborepo `.turbo` folder
//!
//! A `.turbo` folder accumulates two kinds of data:
//! - `runs/`: one JSON record per `turbo run`, listing the cache entries its tasks used
//! - `cache/`: `<hash>.tar.zst` payloads with a `<hash>-meta.json` metadata file each
//!
//! # Overview
//!
//! A purge happens in two phases against the same folder:
//! 1. Run records older than the run retention are removed
//! 2. Cache entries whose metadata is older than the cache retention, and which
//!    no remaining run references, lose both of their files
//!
//! The order matters: references are collected from the runs that survive
//! phase one, so a cache entry is never removed while a retained run points to it.
//!
//! # Errors
//!
//! Structural failures (unreadable folders, failed stats, unreadable run files)
//! abort the current phase. Malformed run files are skipped during run pruning,
//! and individual removal failures are logged without stopping the batch.

// TODO(purge-docs): Add # Errors documentation to all fallible public functions
#![expect(
    clippy::missing_errors_doc,
    reason = "Error documentation to be added incrementally"
)]

mod error;

pub mod cache;
pub mod entries;
pub mod fs;
pub mod layout;
pub mod purge;
pub mod record;
pub mod report;
pub mod retention;
pub mod runs;

#[cfg(test)]
pub(crate) mod testing;

// Re-export error types at crate root
pub use error::{Error, Result};

// Re-export main types
pub use cache::{
    prune_cache_entries, referenced_hashes, referenced_hashes_excluding,
    remove_old_unreferenced_cache_entries,
};
pub use entries::old_cache_entry_hashes;
pub use fs::{Filesystem, LocalFs};
pub use layout::TurboLayout;
pub use purge::{PurgeOptions, Purger};
pub use record::run_task_hashes;
pub use report::{CachePruneReport, PurgeReport, RunsPruneReport};
pub use retention::{PruneContext, RetentionPolicy};
pub use runs::remove_old_runs;
