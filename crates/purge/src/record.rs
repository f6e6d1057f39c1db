//! Run record parsing
//!
//! Turborepo writes one JSON summary per `turbo run` into `.turbo/runs`. The
//! purge reads two things out of it: when the run started, and which cache
//! entries its tasks point to. Both views are validated once here, at the I/O
//! boundary; the pruners only ever see typed values or an [`Error`].

use crate::fs::Filesystem;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// `{ execution: { startTime } }` view of a run record
#[derive(Debug, Clone, Deserialize)]
struct RunExecutionView {
    execution: RunExecution,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunExecution {
    start_time: f64,
}

/// `{ tasks: [{ hash }] }` view of a run record
#[derive(Debug, Clone, Deserialize)]
struct RunTasksView {
    tasks: Vec<RunTask>,
}

#[derive(Debug, Clone, Deserialize)]
struct RunTask {
    hash: String,
}

/// Parse `content` as JSON, then as `T`.
///
/// Invalid JSON and a shape mismatch are reported as different errors so the
/// caller can tell corruption from a schema change.
fn parse_view<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| Error::run_parse(path, e))?;
    serde_json::from_value(value).map_err(|e| Error::run_format(path, e.to_string()))
}

/// Start time of the run described by `content`.
pub fn parse_run_start_time(path: &Path, content: &str) -> Result<DateTime<Utc>> {
    let view: RunExecutionView = parse_view(path, content)?;
    let start_ms = view.execution.start_time;
    if !start_ms.is_finite() || start_ms <= 0.0 {
        return Err(Error::run_format(
            path,
            format!("execution.startTime must be a positive number, got {start_ms}"),
        ));
    }
    #[allow(clippy::cast_possible_truncation)]
    let start_ms = start_ms as i64;
    DateTime::from_timestamp_millis(start_ms).ok_or_else(|| {
        Error::run_format(
            path,
            format!("execution.startTime {start_ms} is out of range"),
        )
    })
}

/// Cache identifiers referenced by the tasks in `content`, in task order.
pub fn parse_run_task_hashes(path: &Path, content: &str) -> Result<Vec<String>> {
    let view: RunTasksView = parse_view(path, content)?;
    Ok(view.tasks.into_iter().map(|task| task.hash).collect())
}

async fn read_run(fs: &dyn Filesystem, path: &Path) -> Result<String> {
    fs.read_to_string(path)
        .await
        .map_err(|e| Error::io(e, path, "read"))
}

/// Read the run file at `path` and return its start time.
pub async fn read_run_start_time(fs: &dyn Filesystem, path: &Path) -> Result<DateTime<Utc>> {
    let content = read_run(fs, path).await?;
    parse_run_start_time(path, &content)
}

/// Read the run file at `path` and return the cache identifiers it references.
///
/// Duplicates are preserved; callers fold the result into a set.
pub async fn run_task_hashes(fs: &dyn Filesystem, path: &Path) -> Result<Vec<String>> {
    let content = read_run(fs, path).await?;
    let hashes = parse_run_task_hashes(path, &content)?;
    tracing::debug!(run = %path.display(), hashes = hashes.len(), "Read run references");
    Ok(hashes)
}
