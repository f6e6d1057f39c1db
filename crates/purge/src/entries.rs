//! Discovery of stale cache entries

use crate::fs::Filesystem;
use crate::layout::hash_from_meta_file_name;
use crate::retention::time_limit;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::path::Path;

/// Identifiers of cache entries whose metadata file was last modified before
/// `now - days_ttl`.
///
/// Only `<hash>-meta.json` files are looked at; payloads and foreign files are
/// never stat'd. A listing or stat failure aborts the whole lookup.
pub async fn old_cache_entry_hashes(
    fs: &dyn Filesystem,
    cache_dir: &Path,
    days_ttl: u32,
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    let limit = time_limit(now, days_ttl);

    let names = fs
        .list_dir(cache_dir)
        .await
        .map_err(|e| Error::io(e, cache_dir, "read_dir"))?;

    let meta_files: Vec<(String, &str)> = names
        .iter()
        .filter_map(|name| {
            hash_from_meta_file_name(name).map(|hash| (hash.to_string(), name.as_str()))
        })
        .collect();

    let ages = try_join_all(meta_files.into_iter().map(|(hash, name)| async move {
        let path = cache_dir.join(name);
        let modified = fs
            .modified(&path)
            .await
            .map_err(|e| Error::io(e, &path, "stat"))?;
        Ok::<_, Error>((hash, DateTime::<Utc>::from(modified)))
    }))
    .await?;

    Ok(ages
        .into_iter()
        .filter(|(_, modified)| *modified < limit)
        .map(|(hash, _)| hash)
        .collect())
}
