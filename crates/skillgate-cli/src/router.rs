//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use std::process::ExitCode;

/// Route CLI commands to their respective handlers
///
/// With no subcommand the binary behaves as the prompt hook.
pub fn route(cli: Cli) -> anyhow::Result<ExitCode> {
    let rules = cli.rules.as_deref();
    let project_dir = cli.project_dir.as_deref();

    match cli.command.unwrap_or(Commands::Hook { surface: false }) {
        Commands::Hook { surface } => commands::hook::run(surface, rules, project_dir),
        Commands::Check {
            prompt,
            files,
            json,
        } => commands::check::run(&prompt, &files, json, rules, project_dir),
        Commands::Rules { json } => commands::rules::run(json, rules, project_dir),
        Commands::Validate { path } => commands::validate::run(path.as_deref(), rules, project_dir),
    }
}
