//! End-to-end purge of a turbo folder

use crate::cache::{has_dir, prune_cache_entries};
use crate::fs::{Filesystem, LocalFs};
use crate::layout::TurboLayout;
use crate::report::{PurgeReport, RunsPruneReport};
use crate::retention::{DEFAULT_READ_CONCURRENCY, PruneContext, RetentionPolicy};
use crate::runs::remove_old_runs;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Everything a purge invocation needs to know.
#[derive(Debug, Clone)]
pub struct PurgeOptions {
    /// The turbo root folder, usually `.turbo`
    pub root: PathBuf,
    /// Retention windows for runs and cache entries
    pub retention: RetentionPolicy,
    /// Log what would be removed without removing it
    pub dry_run: bool,
    /// Maximum number of run files read at the same time
    pub read_concurrency: usize,
}

impl PurgeOptions {
    /// Options for `root` with default retention
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            retention: RetentionPolicy::default(),
            dry_run: false,
            read_concurrency: DEFAULT_READ_CONCURRENCY,
        }
    }
}

/// Runs the two purge phases against one turbo folder.
///
/// Run pruning always happens first: cache pruning must see the post-prune
/// run set, otherwise expired runs would keep protecting their entries.
pub struct Purger {
    fs: Arc<dyn Filesystem>,
    options: PurgeOptions,
}

impl Purger {
    /// Purger working on the local disk
    #[must_use]
    pub fn new(options: PurgeOptions) -> Self {
        Self::with_filesystem(Arc::new(LocalFs), options)
    }

    /// Purger working on an arbitrary [`Filesystem`]
    #[must_use]
    pub fn with_filesystem(fs: Arc<dyn Filesystem>, options: PurgeOptions) -> Self {
        Self { fs, options }
    }

    /// The options this purger was built with
    #[must_use]
    pub const fn options(&self) -> &PurgeOptions {
        &self.options
    }

    /// Purge relative to the current time
    pub async fn run(&self) -> Result<PurgeReport> {
        self.run_at(Utc::now()).await
    }

    /// Purge with every age measured against `now`
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<PurgeReport> {
        let fs = self.fs.as_ref();
        let layout = TurboLayout::new(&self.options.root);
        let ctx = PruneContext::new(now)
            .with_dry_run(self.options.dry_run)
            .with_read_concurrency(self.options.read_concurrency);

        info!("starting cleanup...");
        info!("checking {} folder", layout.root().display());

        if !matches!(fs.dir_exists(layout.root()).await, Ok(true)) {
            return Err(Error::folder_unavailable(layout.root()));
        }

        let runs_dir = layout.runs_dir();
        let runs = if has_dir(fs, &runs_dir).await? {
            remove_old_runs(
                fs,
                &runs_dir,
                self.options.retention.runs_ttl_days(),
                &ctx,
            )
            .await?
        } else {
            info!("No runs folder found at {}.", runs_dir.display());
            RunsPruneReport::default()
        };

        let pending_runs: &[String] = if ctx.dry_run { &runs.expired } else { &[] };
        let cache = prune_cache_entries(
            fs,
            &layout,
            self.options.retention.cache_ttl_days(),
            &ctx,
            pending_runs,
        )
        .await?;

        Ok(PurgeReport {
            dry_run: ctx.dry_run,
            runs,
            cache,
        })
    }
}
