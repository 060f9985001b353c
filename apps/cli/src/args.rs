//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tuner_options::{
    ServiceOption, with_cache_enabled, with_log_level, with_retries, with_timeout,
};

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "tuner")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Resolve sealed service configurations from settings and options")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a service configuration from settings, environment and flags
    Resolve(ResolveArgs),
    /// Print the baseline configuration
    Defaults {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Settings file (TOML, JSON or YAML); `TUNER__*` variables override it
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Address the service binds to
    #[arg(long)]
    pub address: Option<String>,

    /// Request timeout, e.g. `60s` or `1m 30s`
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Number of retries
    #[arg(long)]
    pub retries: Option<u32>,

    /// Enable caching
    #[arg(long, overrides_with = "no_cache")]
    pub cache: bool,

    /// Disable caching
    #[arg(long, overrides_with = "cache")]
    pub no_cache: bool,

    /// Log level; any value is accepted unless `--strict` is given
    #[arg(long)]
    pub log_level: Option<String>,

    /// Reject nonsensical values instead of accepting them
    #[arg(long)]
    pub strict: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

impl ResolveArgs {
    /// Options given on the command line, in field order.
    pub fn to_options(&self) -> Vec<ServiceOption> {
        let cache = if self.cache {
            Some(true)
        } else if self.no_cache {
            Some(false)
        } else {
            None
        };

        [
            self.timeout.map(with_timeout),
            self.retries.map(with_retries),
            cache.map(with_cache_enabled),
            self.log_level.clone().map(with_log_level),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ResolveArgs {
        let cli = Cli::try_parse_from(std::iter::once("tuner").chain(args.iter().copied()))
            .expect("arguments should parse");
        match cli.command {
            Command::Resolve(args) => args,
            Command::Defaults { .. } => panic!("expected resolve"),
        }
    }

    #[test]
    fn no_flags_means_no_options() {
        assert!(parse(&["resolve"]).to_options().is_empty());
    }

    #[test]
    fn flags_become_options() {
        let args = parse(&[
            "resolve",
            "--timeout",
            "1m",
            "--retries",
            "5",
            "--no-cache",
            "--log-level",
            "debug",
        ]);

        assert_eq!(
            args.to_options(),
            vec![
                with_timeout(Duration::from_secs(60)),
                with_retries(5),
                with_cache_enabled(false),
                with_log_level("debug"),
            ]
        );
    }

    #[test]
    fn last_cache_flag_wins() {
        let cases: [(&[&str], Option<bool>); 4] = [
            (&["resolve", "--cache"], Some(true)),
            (&["resolve", "--no-cache"], Some(false)),
            (&["resolve", "--cache", "--no-cache"], Some(false)),
            (&["resolve", "--no-cache", "--cache"], Some(true)),
        ];

        for (argv, expected) in cases {
            let found = parse(argv).to_options().into_iter().find_map(|o| match o {
                ServiceOption::CacheEnabled(enabled) => Some(enabled),
                _ => None,
            });
            assert_eq!(found, expected, "{argv:?}");
        }
    }

    #[test]
    fn rejects_malformed_timeout() {
        assert!(Cli::try_parse_from(["tuner", "resolve", "--timeout", "soon"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
