//! Retention windows for runs and cache entries

use crate::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Days a run record is kept when nothing else is configured
pub const DEFAULT_RUNS_TTL_DAYS: u32 = 7;
/// Days an unreferenced cache entry is kept when nothing else is configured
pub const DEFAULT_CACHE_TTL_DAYS: u32 = 7;
/// Smallest accepted run retention
pub const MIN_RUNS_TTL_DAYS: u32 = 1;
/// Run files read at the same time when nothing else is configured
pub const DEFAULT_READ_CONCURRENCY: usize = 16;

/// Validated pair of retention windows, in days.
///
/// Run retention must be at least one day; cache retention may be zero, which
/// makes every unreferenced entry eligible immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    runs_ttl_days: u32,
    cache_ttl_days: u32,
}

impl RetentionPolicy {
    /// Validate and build a policy
    pub fn new(runs_ttl_days: u32, cache_ttl_days: u32) -> Result<Self> {
        if runs_ttl_days < MIN_RUNS_TTL_DAYS {
            return Err(Error::configuration(format!(
                "invalid runs-ttl: must be at least {MIN_RUNS_TTL_DAYS} day"
            )));
        }
        Ok(Self {
            runs_ttl_days,
            cache_ttl_days,
        })
    }

    /// Retention for run records
    #[must_use]
    pub const fn runs_ttl_days(&self) -> u32 {
        self.runs_ttl_days
    }

    /// Retention for unreferenced cache entries
    #[must_use]
    pub const fn cache_ttl_days(&self) -> u32 {
        self.cache_ttl_days
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            runs_ttl_days: DEFAULT_RUNS_TTL_DAYS,
            cache_ttl_days: DEFAULT_CACHE_TTL_DAYS,
        }
    }
}

/// `now - days`. Anything strictly older than this is stale.
#[must_use]
pub fn time_limit(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - TimeDelta::days(i64::from(days))
}

/// Per-invocation inputs shared by both pruners.
#[derive(Debug, Clone, Copy)]
pub struct PruneContext {
    /// Reference instant for every age computation in the invocation
    pub now: DateTime<Utc>,
    /// Compute and log candidates without removing anything
    pub dry_run: bool,
    /// Maximum number of run files read at the same time
    pub read_concurrency: usize,
}

impl PruneContext {
    /// Context anchored at `now`
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            dry_run: false,
            read_concurrency: DEFAULT_READ_CONCURRENCY,
        }
    }

    /// Toggle dry-run mode
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Bound on concurrent run file reads; zero is treated as one
    #[must_use]
    pub const fn with_read_concurrency(mut self, read_concurrency: usize) -> Self {
        self.read_concurrency = read_concurrency;
        self
    }

    pub(crate) fn read_limit(&self) -> usize {
        self.read_concurrency.max(1)
    }
}

impl Default for PruneContext {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}
