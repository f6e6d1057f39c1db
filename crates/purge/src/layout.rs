//! On-disk layout of a `.turbo` folder

use std::path::{Path, PathBuf};

/// Directory holding one JSON record per executed run
pub const RUNS_DIR: &str = "runs";
/// Directory holding cache payloads and their metadata files
pub const CACHE_DIR: &str = "cache";
/// Suffix of a cache payload archive
pub const PAYLOAD_SUFFIX: &str = ".tar.zst";
/// Suffix of a cache metadata file
pub const META_SUFFIX: &str = "-meta.json";

/// Paths inside a turbo root folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurboLayout {
    root: PathBuf,
}

impl TurboLayout {
    /// Create a layout rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The turbo root folder
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/runs`
    #[must_use]
    pub fn runs_dir(&self) -> PathBuf {
        self.root.join(RUNS_DIR)
    }

    /// `<root>/cache`
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }
}

/// File name of the payload archive for `hash`
#[must_use]
pub fn payload_file_name(hash: &str) -> String {
    format!("{hash}{PAYLOAD_SUFFIX}")
}

/// File name of the metadata file for `hash`
#[must_use]
pub fn meta_file_name(hash: &str) -> String {
    format!("{hash}{META_SUFFIX}")
}

/// Extract the cache identifier from a metadata file name.
///
/// Returns `None` for anything that is not `<hash>-meta.json` with a non-empty hash.
#[must_use]
pub fn hash_from_meta_file_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(META_SUFFIX)
        .filter(|hash| !hash.is_empty())
}
