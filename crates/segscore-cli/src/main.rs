//! segscore command-line interface
//!
//! Scores a tokenizer against a gold-annotated corpus and prints span-level
//! precision, recall and F-measure.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/segscore-cli
//! ```
//!
//! # Commands
//!
//! - `segscore eval [CORPUS]` scores one of the built-in segmenters; settings
//!   come from `segscore.toml` (or `--config`) and command-line flags.
//! - `segscore report FILE` re-renders a report saved with `--output`.
//!
//! Set `RUST_LOG` to override the configured log level.

mod args;
mod commands;
mod console;
mod progress;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use segscore_core::EvalConfig;
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};
use console::CliConsole;

const DEFAULT_LOG_LEVEL: &str = "info";

fn main() -> ExitCode {
    let cli = Cli::parse();
    let console = CliConsole::new(cli.verbose);

    match run(cli, &console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, console: &CliConsole) -> Result<()> {
    match cli.command {
        Commands::Eval(args) => {
            let config = EvalConfig::load(&args.config)?;
            init_logging(cli.verbose, &config.log_level);
            commands::eval::run(&args, config, console)
        }
        Commands::Report { input, report } => {
            init_logging(cli.verbose, DEFAULT_LOG_LEVEL);
            commands::report::run(&input, report)
        }
    }
}

/// `--verbose` wins, then RUST_LOG, then the configured level
fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
