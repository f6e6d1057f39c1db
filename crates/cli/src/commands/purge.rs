use crate::cli::PurgeArgs;
use crate::config::load_options;
use crate::errors::{CliError, CliResult};
use tracing::{info, instrument};
use turbo_purge::{PurgeReport, Purger};

/// Resolve the options for `args` and purge the turbo folder they point at
#[instrument(skip_all, fields(path = %args.path.display()))]
pub async fn execute_purge(args: &PurgeArgs) -> CliResult<PurgeReport> {
    let options = load_options(args)?;
    info!(
        runs_ttl = options.retention.runs_ttl_days(),
        cache_ttl = options.retention.cache_ttl_days(),
        dry_run = options.dry_run,
        "Resolved purge options"
    );

    let report = Purger::new(options).run().await?;
    info!("{report}");
    Ok(report)
}

/// Text written to stdout once the purge has finished
pub fn render_summary(report: &PurgeReport, json: bool) -> CliResult<String> {
    if json {
        serde_json::to_string(report).map_err(|source| CliError::SummaryError { source })
    } else {
        Ok(report.to_string())
    }
}
