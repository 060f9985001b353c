//! # Tuner CLI
//!
//! Resolves a service configuration the way a host process would: settings file,
//! then `TUNER__*` environment variables, then command-line flags, each layer
//! appended as options so the last one wins.

pub mod args;
pub mod commands;
pub mod output;

use crate::args::{Cli, Command};
use anyhow::Context;
use std::io::Write;
use tracing::info;
use tuner_logger::{LevelFilter, Logger};

/// Runs one CLI invocation, writing command output to `out`.
///
/// For `resolve` the logger is installed at `info` before settings are read, then
/// moved to the level the resolved options name (still `info` for names `tracing`
/// does not know) before the service is sealed.
///
/// # Errors
///
/// Returns every failure to the caller; nothing here exits the process.
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Command::Resolve(args) => {
            let logger = Logger::builder(env!("CARGO_PKG_NAME"))
                .level(LevelFilter::INFO)
                .init()
                .context("Failed to initialize logging")?;

            let resolution = commands::gather(&args)?;
            logger.set_level(resolution.level_filter()).context("Failed to apply log level")?;

            let service = resolution.seal()?;
            info!(
                address = service.address(),
                log_level = %service.log_level(),
                "Service configuration resolved"
            );
            output::render(&service, args.format, out)
        },
        Command::Defaults { format } => output::render(&commands::defaults(), format, out),
    }
}
