//! Tracing configuration for the purge CLI
//!
//! Progress lines, warnings and deletion failures are all tracing events.
//! They always go to stderr so stdout only carries the final summary.

use std::io;
use std::sync::OnceLock;
use tracing_subscriber::{
    Layer, Registry, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};
use uuid::Uuid;

/// Tracing output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TracingFormat {
    /// Pretty-printed multi-line format
    Pretty,
    /// Compact single-line format
    Compact,
    /// Structured JSON format
    Json,
    /// Development format with file locations
    Dev,
}

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Show all logs (trace level)
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above (default)
    Info,
    /// Show warnings and above
    Warn,
    /// Show errors only
    Error,
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn directive(self) -> String {
        let level = self.as_str();
        format!("turbo_purge={level},turbo_cache_purge={level}")
    }
}

/// How the purge binary reports progress
#[derive(Debug, Clone, Copy)]
pub struct TracingConfig {
    pub format: TracingFormat,
    pub level: LogLevel,
}

static CORRELATION_ID: OnceLock<Uuid> = OnceLock::new();

/// Identifier logged once per invocation
pub fn correlation_id() -> Uuid {
    *CORRELATION_ID.get_or_init(Uuid::new_v4)
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn filter_layer(level: LogLevel) -> miette::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.directive()))
        .map_err(|e| miette::miette!("Failed to create tracing filter: {e}"))
}

fn output_layer(format: TracingFormat) -> BoxedLayer {
    let base = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    match format {
        TracingFormat::Pretty => base.pretty().with_target(true).boxed(),
        TracingFormat::Compact => base.compact().with_target(false).without_time().boxed(),
        TracingFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        TracingFormat::Dev => base
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_thread_ids(true)
            .boxed(),
    }
}

/// Install the global subscriber
pub fn init_tracing(config: TracingConfig) -> miette::Result<()> {
    let filter = filter_layer(config.level)?;

    tracing_subscriber::registry()
        .with(output_layer(config.format))
        .with(filter)
        .init();

    tracing::debug!(
        correlation_id = %correlation_id(),
        version = env!("CARGO_PKG_VERSION"),
        format = ?config.format,
        "Tracing initialized"
    );

    Ok(())
}
