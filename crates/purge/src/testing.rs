//! In-memory [`Filesystem`] for unit tests

use crate::fs::Filesystem;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Read,
    Stat,
    Remove,
}

#[derive(Debug, Clone)]
struct MemoryFile {
    content: String,
    modified: SystemTime,
}

/// Flat map of files plus a set of directories, with per-path failure injection.
#[derive(Debug, Default)]
pub struct MemoryFs {
    dirs: Mutex<BTreeSet<PathBuf>>,
    files: Mutex<BTreeMap<PathBuf, MemoryFile>>,
    failures: Mutex<HashMap<(Op, PathBuf), io::ErrorKind>>,
    calls: Mutex<Vec<(Op, PathBuf)>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) -> &Self {
        self.dirs.lock().unwrap().insert(path.into());
        self
    }

    pub fn add_file(
        &self,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        modified: DateTime<Utc>,
    ) -> &Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.dirs.lock().unwrap().insert(parent.to_path_buf());
        }
        self.files.lock().unwrap().insert(
            path,
            MemoryFile {
                content: content.into(),
                modified: modified.into(),
            },
        );
        self
    }

    pub fn fail(&self, op: Op, path: impl Into<PathBuf>, kind: io::ErrorKind) -> &Self {
        self.failures.lock().unwrap().insert((op, path.into()), kind);
        self
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.files.lock().unwrap().contains_key(path.as_ref())
    }

    pub fn calls(&self, op: Op) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, _)| *o == op)
            .map(|(_, p)| p.clone())
            .collect()
    }

    fn record(&self, op: Op, path: &Path) -> io::Result<()> {
        self.calls.lock().unwrap().push((op, path.to_path_buf()));
        match self.failures.lock().unwrap().get(&(op, path.to_path_buf())) {
            Some(kind) => Err(io::Error::new(*kind, format!("injected {op:?} failure"))),
            None => Ok(()),
        }
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file or directory: {}", path.display()),
        )
    }
}

#[async_trait]
impl Filesystem for MemoryFs {
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        self.record(Op::List, path)?;
        if !self.dirs.lock().unwrap().contains(path) {
            return Err(Self::not_found(path));
        }
        let mut names: Vec<String> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.record(Op::Read, path)?;
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|f| f.content.clone())
            .ok_or_else(|| Self::not_found(path))
    }

    async fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        self.record(Op::Stat, path)?;
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|f| f.modified)
            .ok_or_else(|| Self::not_found(path))
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.record(Op::Remove, path)?;
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(path))
    }

    async fn dir_exists(&self, path: &Path) -> io::Result<bool> {
        let exists = self.dirs.lock().unwrap().contains(path);
        let failure = self
            .failures
            .lock()
            .unwrap()
            .get(&(Op::List, path.to_path_buf()))
            .copied();
        match failure {
            Some(kind) if exists => Err(io::Error::new(kind, "injected List failure")),
            _ => Ok(exists),
        }
    }
}

/// JSON body of a run record started at `start` and referencing `hashes`.
pub fn run_json(start: DateTime<Utc>, hashes: &[&str]) -> String {
    let tasks: Vec<serde_json::Value> = hashes
        .iter()
        .map(|h| serde_json::json!({ "taskId": format!("pkg#{h}"), "hash": h }))
        .collect();
    serde_json::json!({
        "id": "run",
        "execution": { "startTime": start.timestamp_millis(), "exitCode": 0 },
        "tasks": tasks,
    })
    .to_string()
}
