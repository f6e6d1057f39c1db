//! Configuration resolution for a purge invocation
//!
//! Values come from three places, highest precedence first: command line flags
//! (or their environment variables), an optional `purge.toml`, and the
//! built-in defaults.

use crate::cli::PurgeArgs;
use crate::errors::{CliError, CliResult};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use turbo_purge::retention::{
    DEFAULT_CACHE_TTL_DAYS, DEFAULT_READ_CONCURRENCY, DEFAULT_RUNS_TTL_DAYS,
};
use turbo_purge::{PurgeOptions, RetentionPolicy};

/// File looked up inside the turbo folder when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "purge.toml";

/// Contents of a `purge.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PurgeConfig {
    pub runs_ttl: Option<u32>,
    pub cache_ttl: Option<u32>,
    pub dry_run: Option<bool>,
    pub read_concurrency: Option<usize>,
}

impl PurgeConfig {
    /// Parse TOML content; `origin` names the file in error reports
    pub fn from_toml(origin: &Path, content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| {
            CliError::config_parse_error(origin.display().to_string(), content, &e)
        })
    }

    /// Load the explicit config file, or `<root>/purge.toml` if it exists.
    ///
    /// An explicit file that cannot be read is an error. A missing implicit
    /// file just means there is no file configuration.
    pub fn load(explicit: Option<&Path>, root: &Path) -> CliResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let implicit = root.join(CONFIG_FILE_NAME);
                if !implicit.is_file() {
                    return Ok(Self::default());
                }
                implicit
            }
        };

        debug!(config = %path.display(), "Loading purge configuration");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| CliError::file_error("read", &path, e))?;
        Self::from_toml(&path, &content)
    }
}

/// Merge command line arguments over file configuration and defaults
pub fn resolve(args: &PurgeArgs, file: &PurgeConfig) -> CliResult<PurgeOptions> {
    let runs_ttl = args
        .runs_ttl
        .or(file.runs_ttl)
        .unwrap_or(DEFAULT_RUNS_TTL_DAYS);
    let cache_ttl = args
        .cache_ttl
        .or(file.cache_ttl)
        .unwrap_or(DEFAULT_CACHE_TTL_DAYS);
    let read_concurrency = file.read_concurrency.unwrap_or(DEFAULT_READ_CONCURRENCY);
    if read_concurrency == 0 {
        return Err(CliError::invalid_argument(
            "read_concurrency must be at least 1",
        ));
    }

    let mut options = PurgeOptions::new(args.path.clone());
    options.retention = RetentionPolicy::new(runs_ttl, cache_ttl)?;
    options.dry_run = args.dry_run || file.dry_run.unwrap_or(false);
    options.read_concurrency = read_concurrency;
    Ok(options)
}

/// Load the configuration file for `args` and resolve the final options
pub fn load_options(args: &PurgeArgs) -> CliResult<PurgeOptions> {
    let file = PurgeConfig::load(args.config.as_deref(), &args.path)?;
    resolve(args, &file)
}
