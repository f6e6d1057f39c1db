//! Removal of stale, unreferenced cache entries

use crate::entries::old_cache_entry_hashes;
use crate::fs::{Filesystem, remove_all};
use crate::layout::{TurboLayout, meta_file_name, payload_file_name};
use crate::record::run_task_hashes;
use crate::report::CachePruneReport;
use crate::retention::PruneContext;
use crate::{Error, Result};
use futures::{StreamExt, TryStreamExt, stream};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, error, info, instrument};

/// Union of the cache identifiers referenced by every run file in `runs_dir`.
///
/// Any unreadable or malformed run aborts the computation: a run whose
/// references are unknown could be pointing at anything.
pub async fn referenced_hashes(
    fs: &dyn Filesystem,
    runs_dir: &Path,
    read_concurrency: usize,
) -> Result<HashSet<String>> {
    referenced_hashes_excluding(fs, runs_dir, read_concurrency, &[]).await
}

/// [`referenced_hashes`], ignoring the run files named in `excluded`.
pub async fn referenced_hashes_excluding(
    fs: &dyn Filesystem,
    runs_dir: &Path,
    read_concurrency: usize,
    excluded: &[String],
) -> Result<HashSet<String>> {
    let names = fs
        .list_dir(runs_dir)
        .await
        .map_err(|e| Error::io(e, runs_dir, "read_dir"))?;

    stream::iter(names.into_iter().filter(|name| !excluded.contains(name)))
        .map(|name| async move { run_task_hashes(fs, &runs_dir.join(name)).await })
        .buffer_unordered(read_concurrency.max(1))
        .try_fold(HashSet::new(), |mut referenced, hashes| async move {
            referenced.extend(hashes);
            Ok::<_, Error>(referenced)
        })
        .await
}

/// Delete the payload and metadata files of every cache entry that is older
/// than `now - days_ttl` and not referenced by any run left in the runs folder.
///
/// Must run after run pruning so that expired runs no longer protect their
/// entries. Removal failures are collected and reported together; they never
/// stop the other removals.
pub async fn remove_old_unreferenced_cache_entries(
    fs: &dyn Filesystem,
    layout: &TurboLayout,
    days_ttl: u32,
    ctx: &PruneContext,
) -> Result<CachePruneReport> {
    prune_cache_entries(fs, layout, days_ttl, ctx, &[]).await
}

/// Cache pruning that treats the runs in `expired_runs` as already gone.
///
/// A dry run leaves expired run files on disk; passing them here keeps them
/// from protecting entries a real purge would remove.
#[instrument(skip_all, fields(root = %layout.root().display(), days_ttl = days_ttl))]
pub async fn prune_cache_entries(
    fs: &dyn Filesystem,
    layout: &TurboLayout,
    days_ttl: u32,
    ctx: &PruneContext,
    expired_runs: &[String],
) -> Result<CachePruneReport> {
    let runs_dir = layout.runs_dir();
    let cache_dir = layout.cache_dir();
    let mut report = CachePruneReport::default();

    if !has_dir(fs, &cache_dir).await? {
        info!("No cache folder found at {}.", cache_dir.display());
        return Ok(report);
    }

    let referenced = if has_dir(fs, &runs_dir).await? {
        referenced_hashes_excluding(fs, &runs_dir, ctx.read_limit(), expired_runs).await?
    } else {
        debug!(runs_dir = %runs_dir.display(), "No runs folder, nothing is referenced");
        HashSet::new()
    };
    report.referenced = referenced.len();

    report.stale = old_cache_entry_hashes(fs, &cache_dir, days_ttl, ctx.now).await?;
    info!("Found {} old cache entries.", report.stale.len());

    report.unreferenced = report
        .stale
        .iter()
        .filter(|hash| !referenced.contains(hash.as_str()))
        .cloned()
        .collect();
    info!(
        "Found {} unreferenced cache entries",
        report.unreferenced.len()
    );

    if report.unreferenced.is_empty() {
        return Ok(report);
    }

    let files: Vec<String> = report
        .unreferenced
        .iter()
        .map(|hash| payload_file_name(hash))
        .chain(report.unreferenced.iter().map(|hash| meta_file_name(hash)))
        .collect();

    if ctx.dry_run {
        info!(
            "Would remove {} unreferenced cache entries ({} files).",
            report.unreferenced.len(),
            files.len()
        );
        return Ok(report);
    }

    info!(
        "Removing {} unreferenced cache entries.",
        report.unreferenced.len()
    );
    info!("Removing {} files.", files.len());

    let mut failures = Vec::new();
    for (file, result) in remove_all(fs, &cache_dir, &files).await {
        match result {
            Ok(()) => report.removed_files.push(file),
            Err(err) => failures.push((file, err)),
        }
    }

    if !failures.is_empty() {
        report.failed = failures.iter().map(|(file, _)| file.clone()).collect();
        error!(
            "Failed to remove {} file(s): {:?}",
            report.failed.len(),
            report.failed
        );
        for (file, err) in &failures {
            error!("Error removing {file}: {err}");
        }
    }

    Ok(report)
}

/// Whether `dir` exists; only a missing directory yields `false`.
pub(crate) async fn has_dir(fs: &dyn Filesystem, dir: &Path) -> Result<bool> {
    fs.dir_exists(dir)
        .await
        .map_err(|e| Error::io(e, dir, "read_dir"))
}
