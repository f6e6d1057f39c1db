//! Error display using miette for contextual error reporting
//!
//! Core purge errors pass through unchanged; configuration problems carry the
//! offending TOML source so miette can point at the bad value.

use miette::{Diagnostic, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Configuration parsing failed: {config_file}: {message}")]
    #[diagnostic(code(turbo_cache_purge::cli::config_parse_error))]
    ConfigParseError {
        config_file: String,
        message: String,
        #[source_code]
        src: String,
        #[label("invalid value")]
        error_span: Option<SourceSpan>,
        #[help]
        help_text: Option<String>,
    },

    #[error("File operation failed: {operation} {}", path.display())]
    #[diagnostic(
        code(turbo_cache_purge::cli::file_error),
        help("Check file permissions and ensure the path exists")
    )]
    FileError {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid command line argument: {argument}")]
    #[diagnostic(
        code(turbo_cache_purge::cli::invalid_argument),
        help("Run 'turbo-cache-purge --help' to see available options")
    )]
    InvalidArgument { argument: String },

    #[error("Could not render the purge summary")]
    #[diagnostic(code(turbo_cache_purge::cli::summary_error))]
    SummaryError {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Purge(#[from] turbo_purge::Error),
}

impl CliError {
    pub fn config_parse_error(
        config_file: impl Into<String>,
        src: impl Into<String>,
        error: &toml::de::Error,
    ) -> Self {
        Self::ConfigParseError {
            config_file: config_file.into(),
            message: error.message().to_string(),
            src: src.into(),
            error_span: error.span().map(SourceSpan::from),
            help_text: Some(
                "Supported keys are runs_ttl, cache_ttl, dry_run and read_concurrency".to_string(),
            ),
        }
    }

    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileError {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    pub fn invalid_argument(argument: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
