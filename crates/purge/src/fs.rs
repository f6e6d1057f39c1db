//! Filesystem access used by the pruners
//!
//! Every primitive the purge needs goes through [`Filesystem`], so the pruning
//! logic can run against the real disk ([`LocalFs`]) or an in-memory tree with
//! injected failures in tests.

use async_trait::async_trait;
use futures::future::join_all;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Raw file operations the purge depends on.
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Names of the entries directly inside `path`, sorted.
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Full UTF-8 content of the file at `path`.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Last modification time of the file at `path`.
    async fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Remove the file at `path`.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Whether a directory exists at `path`.
    ///
    /// `Ok(false)` means nothing is there. A directory that exists but cannot
    /// be listed, or a path that is not a directory, is an error.
    async fn dir_exists(&self, path: &Path) -> io::Result<bool>;
}

/// [`Filesystem`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl Filesystem for LocalFs {
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        tokio::fs::metadata(path).await?.modified()
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }

    async fn dir_exists(&self, path: &Path) -> io::Result<bool> {
        let meta = match tokio::fs::metadata(path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if !meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", path.display()),
            ));
        }
        tokio::fs::read_dir(path).await?;
        Ok(true)
    }
}

/// Remove every `names` entry of `dir` concurrently.
///
/// Never fail-fast: each removal runs to completion and its outcome is returned
/// alongside the file name, in input order.
pub(crate) async fn remove_all(
    fs: &dyn Filesystem,
    dir: &Path,
    names: &[String],
) -> Vec<(String, io::Result<()>)> {
    join_all(names.iter().map(|name| async move {
        let result = fs.remove_file(&dir.join(name)).await;
        (name.clone(), result)
    }))
    .await
}
