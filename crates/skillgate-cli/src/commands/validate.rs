//! Validate command: strict check of a rule file

use crate::console::CliConsole;
use crate::context::CommandContext;
use skillgate_core::rules::RuleLoader;
use skillgate_core::RuleSource;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Validate `path`, or the rule file discovery would pick
///
/// Exits with failure when the file cannot be read or parsed, or when any
/// entry was skipped. Literal-fallback intents and rules without triggers
/// are reported as warnings only.
pub fn run(
    path: Option<&Path>,
    rules_path: Option<&Path>,
    project_dir: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let console = CliConsole::new();

    let Some(target) = target_file(path, rules_path, project_dir) else {
        console.error("No rule file found to validate");
        return Ok(ExitCode::FAILURE);
    };

    if validate_file(&console, &target) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Report on one rule file, returning whether it is valid
fn validate_file(console: &CliConsole, target: &Path) -> bool {
    let source = RuleSource::Explicit(target.to_path_buf());
    console.header("Rule validation", &source);

    let rules = match RuleLoader::load_file(target, source) {
        Ok(rules) => rules,
        Err(e) => {
            console.error(&e.to_string());
            return false;
        }
    };

    let mut warnings = 0;
    for rule in rules.rules() {
        for pattern in rule.intents().literal_fallbacks() {
            warnings += 1;
            console.rule_warning(
                rule.name(),
                &format!("intent pattern {:?} is not a valid regex, matched literally", pattern),
            );
        }
        if rule.is_dormant() {
            warnings += 1;
            console.rule_warning(rule.name(), "no triggers, it can never match");
        }
    }

    for skipped in rules.skipped() {
        console.skipped(skipped);
    }

    if rules.skipped().is_empty() {
        console.success(&format!(
            "{} rules valid ({} warnings)",
            rules.len(),
            warnings
        ));
        true
    } else {
        console.error(&format!(
            "{} of {} rules skipped",
            rules.skipped().len(),
            rules.len() + rules.skipped().len()
        ));
        false
    }
}

/// The file to validate: the argument, then `--rules`, then the discovered
/// project file if present, then the user file
fn target_file(
    path: Option<&Path>,
    rules_path: Option<&Path>,
    project_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = path.or(rules_path) {
        return Some(path.to_path_buf());
    }

    let context = CommandContext::new(None, project_dir, None);
    let locations = context.loader.locations();
    locations
        .primary
        .iter()
        .chain(locations.fallback.iter())
        .find(|candidate| candidate.is_file())
        .cloned()
}
