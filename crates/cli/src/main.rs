//! `turbo-cache-purge`: remove old turbo runs and the cache entries only they used

// The binary prints its summary and the final error report directly
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;
mod config;
mod errors;
mod tracing;

use crate::commands::Command;
use crate::tracing::{TracingConfig, init_tracing};
use ::tracing::instrument;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    if let Err(error) = run_main().await {
        eprintln!("{error:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> miette::Result<()> {
    let cli = cli::parse();

    init_tracing(TracingConfig {
        format: cli.tracing_format(),
        level: cli.level,
    })?;

    let json = cli.json;
    execute_command(cli.into_command(), json).await
}

#[instrument(skip(command))]
async fn execute_command(command: Command, json: bool) -> miette::Result<()> {
    let output = match command {
        Command::Version => commands::version::get_version_info(),
        Command::Purge(args) => {
            let report = commands::purge::execute_purge(&args).await?;
            commands::purge::render_summary(&report, json)?
        }
    };

    println!("{output}");
    Ok(())
}
