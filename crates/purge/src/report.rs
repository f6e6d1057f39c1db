//! Outcome summaries returned by the pruners

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one run-pruning pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunsPruneReport {
    /// Number of entries found in the runs folder
    pub found: usize,
    /// Run files skipped because their content was corrupt or malformed
    pub skipped: Vec<String>,
    /// Run files older than the retention window
    pub expired: Vec<String>,
    /// Run files actually removed
    pub removed: Vec<String>,
    /// Run files whose removal failed
    pub failed: Vec<String>,
}

/// Outcome of one cache-pruning pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePruneReport {
    /// Distinct identifiers referenced by the remaining runs
    pub referenced: usize,
    /// Identifiers whose metadata is older than the retention window
    pub stale: Vec<String>,
    /// Stale identifiers no remaining run references
    pub unreferenced: Vec<String>,
    /// Cache files actually removed
    pub removed_files: Vec<String>,
    /// Cache files whose removal failed
    pub failed: Vec<String>,
}

/// Combined outcome of a purge invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    /// Whether deletions were skipped
    pub dry_run: bool,
    /// Run pruning outcome
    pub runs: RunsPruneReport,
    /// Cache pruning outcome
    pub cache: CachePruneReport,
}

impl fmt::Display for PurgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            write!(
                f,
                "dry run: would remove {} runs and {} cache entries",
                self.runs.expired.len(),
                self.cache.unreferenced.len()
            )
        } else {
            write!(
                f,
                "removed {} runs and {} cache files ({} failures)",
                self.runs.removed.len(),
                self.cache.removed_files.len(),
                self.runs.failed.len() + self.cache.failed.len()
            )
        }
    }
}
