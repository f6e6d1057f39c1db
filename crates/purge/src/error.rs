//! Error types for the purge crate

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Error type for purge operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// I/O error while listing, reading, inspecting or removing files
    #[error("I/O {operation} failed{}", path.as_ref().map_or(String::new(), |p| format!(": {}", p.display())))]
    #[diagnostic(
        code(turbo_purge::io),
        help("Check file permissions and ensure the path exists")
    )]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Path that caused the error, if available
        path: Option<Box<Path>>,
        /// Operation that failed (e.g., "read_dir", "read", "stat", "remove")
        operation: String,
    },

    /// Run file content is not valid JSON
    #[error("could not read or parse run file: {}", path.display())]
    #[diagnostic(
        code(turbo_purge::run_parse),
        help("The run record is corrupt; delete it or let the build tool rewrite it")
    )]
    RunParse {
        /// Run file that failed to parse
        path: Box<Path>,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// Run file is JSON but does not match the expected shape
    #[error("invalid run file format: {}: {details}", path.display())]
    #[diagnostic(code(turbo_purge::run_format))]
    RunFormat {
        /// Run file that failed validation
        path: Box<Path>,
        /// Field-level description of the violation
        details: String,
    },

    /// A directory the purge depends on is missing or unreadable
    #[error("{} folder does not exist or is not readable", path.display())]
    #[diagnostic(
        code(turbo_purge::folder_unavailable),
        help("Pass the path to the .turbo folder as the first argument")
    )]
    FolderUnavailable {
        /// The directory that failed the readability check
        path: Box<Path>,
    },

    /// Configuration or validation error
    #[error("Purge configuration error: {message}")]
    #[diagnostic(code(turbo_purge::config))]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    /// Create an I/O error with path context
    #[must_use]
    pub fn io(
        source: std::io::Error,
        path: impl AsRef<Path>,
        operation: impl Into<String>,
    ) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().into()),
            operation: operation.into(),
        }
    }

    /// Create a run parse error
    #[must_use]
    pub fn run_parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::RunParse {
            path: path.as_ref().into(),
            source,
        }
    }

    /// Create a run format error
    #[must_use]
    pub fn run_format(path: impl AsRef<Path>, details: impl Into<String>) -> Self {
        Self::RunFormat {
            path: path.as_ref().into(),
            details: details.into(),
        }
    }

    /// Create a folder unavailable error
    #[must_use]
    pub fn folder_unavailable(path: impl AsRef<Path>) -> Self {
        Self::FolderUnavailable {
            path: path.as_ref().into(),
        }
    }

    /// Whether the error concerns a single run file's content.
    ///
    /// The run pruner logs and skips these; everything else aborts the stage.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::RunParse { .. } | Self::RunFormat { .. })
    }
}

/// Result type for purge operations
pub type Result<T> = std::result::Result<T, Error>;
