//! Removal of expired run records

use crate::fs::{Filesystem, remove_all};
use crate::record::read_run_start_time;
use crate::report::RunsPruneReport;
use crate::retention::{PruneContext, time_limit};
use crate::{Error, Result};
use futures::{StreamExt, stream};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Delete run records in `runs_dir` that started before `now - days_ttl`.
///
/// A run file that cannot be read fails the whole pass. A run file that is not
/// JSON, or has no positive `execution.startTime`, is logged and left alone.
/// Removal failures are logged per file and never stop the other removals.
#[instrument(skip_all, fields(runs_dir = %runs_dir.display(), days_ttl = days_ttl))]
pub async fn remove_old_runs(
    fs: &dyn Filesystem,
    runs_dir: &Path,
    days_ttl: u32,
    ctx: &PruneContext,
) -> Result<RunsPruneReport> {
    let limit = time_limit(ctx.now, days_ttl);

    let names = fs
        .list_dir(runs_dir)
        .await
        .map_err(|e| Error::io(e, runs_dir, "read_dir"))?;

    info!("Found {} runs.", names.len());

    let mut report = RunsPruneReport {
        found: names.len(),
        ..Default::default()
    };

    let start_times: Vec<_> = stream::iter(names)
        .map(|name| async move {
            let start = read_run_start_time(fs, &runs_dir.join(&name)).await;
            (name, start)
        })
        .buffered(ctx.read_limit())
        .collect()
        .await;

    for (name, start) in start_times {
        match start {
            Ok(start) if start < limit => report.expired.push(name),
            Ok(_) => {}
            Err(err) if err.is_recoverable() => {
                warn!(run = %name, "{err}");
                report.skipped.push(name);
            }
            Err(err) => return Err(err),
        }
    }

    if report.expired.is_empty() {
        info!("No runs older than {days_ttl} days found.");
        return Ok(report);
    }

    if ctx.dry_run {
        info!(
            "Would remove {} runs older than {days_ttl} days.",
            report.expired.len()
        );
        return Ok(report);
    }

    info!(
        "Removing {} runs older than {days_ttl} days.",
        report.expired.len()
    );

    for (name, result) in remove_all(fs, runs_dir, &report.expired).await {
        match result {
            Ok(()) => report.removed.push(name),
            Err(err) => {
                warn!(run = %name, "could not delete run file: {name}: {err}");
                report.failed.push(name);
            }
        }
    }

    Ok(report)
}
