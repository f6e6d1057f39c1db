use crate::commands::Command;
use crate::tracing::{LogLevel, TracingFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "turbo-cache-purge")]
#[command(about = "Remove old turbo runs and the stale cache entries no remaining run uses")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub purge: PurgeArgs,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "info",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(
        long,
        global = true,
        help = "Output logs and the summary in JSON format"
    )]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeArgs {
    #[arg(help = "Path to the turbo folder", default_value = ".turbo")]
    pub path: PathBuf,

    #[arg(
        long,
        env = "TURBO_PURGE_RUNS_TTL",
        value_name = "DAYS",
        help = "Remove runs older than this many days (at least 1) [default: 7]"
    )]
    pub runs_ttl: Option<u32>,

    #[arg(
        long,
        env = "TURBO_PURGE_CACHE_TTL",
        value_name = "DAYS",
        help = "Remove unreferenced cache entries older than this many days [default: 7]"
    )]
    pub cache_ttl: Option<u32>,

    #[arg(long, help = "Log what would be removed without removing anything")]
    pub dry_run: bool,

    #[arg(
        long,
        env = "TURBO_PURGE_CONFIG",
        value_name = "FILE",
        help = "TOML configuration file [default: <PATH>/purge.toml when present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Show version information")]
    Version,
}

impl Cli {
    /// The command to run; purging is the default when no subcommand is given
    pub fn into_command(self) -> Command {
        match self.command {
            Some(Commands::Version) => Command::Version,
            None => Command::Purge(self.purge),
        }
    }

    pub fn tracing_format(&self) -> TracingFormat {
        if self.json {
            TracingFormat::Json
        } else {
            self.log_format
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["turbo-cache-purge"]).unwrap();

        assert_eq!(cli.level, LogLevel::Info);
        assert_eq!(cli.log_format, TracingFormat::Compact);
        assert!(!cli.json);
        assert!(cli.command.is_none());
        assert_eq!(cli.purge.path, PathBuf::from(".turbo"));
        assert!(!cli.purge.dry_run);
    }

    #[test]
    fn test_positional_path_and_ttls() {
        let cli = Cli::try_parse_from([
            "turbo-cache-purge",
            "build/.turbo",
            "--runs-ttl",
            "3",
            "--cache-ttl",
            "0",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.purge.path, PathBuf::from("build/.turbo"));
        assert_eq!(cli.purge.runs_ttl, Some(3));
        assert_eq!(cli.purge.cache_ttl, Some(0));
        assert!(cli.purge.dry_run);
    }

    #[test]
    fn test_non_integer_ttl_is_rejected() {
        assert!(Cli::try_parse_from(["turbo-cache-purge", "--runs-ttl", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["turbo-cache-purge", "--cache-ttl", "week"]).is_err());
    }

    #[test]
    fn test_negative_ttl_is_rejected() {
        assert!(Cli::try_parse_from(["turbo-cache-purge", "--cache-ttl", "-1"]).is_err());
    }

    #[test]
    fn test_cli_log_level_parsing() {
        let cli = Cli::try_parse_from(["turbo-cache-purge", "--level", "debug"]).unwrap();
        assert_eq!(cli.level, LogLevel::Debug);

        let cli = Cli::try_parse_from(["turbo-cache-purge", "-l", "error"]).unwrap();
        assert_eq!(cli.level, LogLevel::Error);

        assert!(Cli::try_parse_from(["turbo-cache-purge", "--level", "loud"]).is_err());
    }

    #[test]
    fn test_json_flag_overrides_log_format() {
        let cli = Cli::try_parse_from(["turbo-cache-purge", "--log-format", "pretty", "--json"])
            .unwrap();
        assert_eq!(cli.tracing_format(), TracingFormat::Json);

        let cli = Cli::try_parse_from(["turbo-cache-purge", "--log-format", "dev"]).unwrap();
        assert_eq!(cli.tracing_format(), TracingFormat::Dev);
    }

    #[test]
    fn test_version_subcommand() {
        let cli = Cli::try_parse_from(["turbo-cache-purge", "version"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Version));
        assert!(matches!(cli.into_command(), Command::Version));
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["turbo-cache-purge", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["turbo-cache-purge", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_default_command_is_purge() {
        let cli = Cli::try_parse_from(["turbo-cache-purge", "cache-root", "--config", "p.toml"])
            .unwrap();

        match cli.into_command() {
            Command::Purge(args) => {
                assert_eq!(args.path, PathBuf::from("cache-root"));
                assert_eq!(args.config, Some(PathBuf::from("p.toml")));
            }
            Command::Version => panic!("Expected purge command"),
        }
    }
}
