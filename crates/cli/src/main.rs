//! kagi entry point.
//!
//! Prints the formatted FastGPT answer on stdout. Logging, prompts, errors,
//! and usage all go to stderr so the answer can be piped cleanly.

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod app;
mod args;

use args::{Cli, normalize_flags};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_flags(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match app::invoke(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            if err.shows_usage() {
                print_usage();
            }
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `--verbose` raises the level to `info`.
fn init_tracing(verbose: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(if verbose { "info" } else { "warn" })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}

fn print_usage() {
    eprintln!("{}", Cli::command().render_help());
}
