//! Skillgate CLI
//!
//! Decides which skills to surface for a prompt. Run without arguments it
//! acts as a prompt-submit hook: the payload arrives on stdin and the
//! decision leaves on stdout.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/skillgate-cli
//! ```
//!
//! # Logging
//!
//! Logs always go to stderr so stdout stays reserved for the hook protocol.
//! `RUST_LOG` takes precedence; otherwise `-v` switches from `warn` to
//! `debug`.

mod args;
mod commands;
mod console;
mod context;
mod router;

use args::Cli;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(false).init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    match router::route(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
