//! Rules command: list the rules that would be used

use crate::console::CliConsole;
use crate::context::CommandContext;
use colored::*;
use serde_json::json;
use skillgate_core::Rule;
use std::path::Path;
use std::process::ExitCode;

/// Print the discovered rule set
pub fn run(
    json: bool,
    rules_path: Option<&Path>,
    project_dir: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let context = CommandContext::new(rules_path, project_dir, None);
    let rules = context.load_rules();

    if json {
        let entries: Vec<_> = rules
            .rules()
            .iter()
            .map(|rule| {
                json!({
                    "name": rule.name(),
                    "definition": rule.definition(),
                })
            })
            .collect();
        let output = json!({
            "source": rules.source(),
            "version": rules.version(),
            "rules": entries,
            "skipped": rules.skipped(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(ExitCode::SUCCESS);
    }

    let console = CliConsole::new();
    console.header("Skill rules", rules.source());

    if rules.is_empty() {
        console.warn("No rules loaded");
    }

    for rule in rules.rules() {
        print_rule(rule);
    }

    for skipped in rules.skipped() {
        console.skipped(skipped);
    }

    println!();
    println!("Total: {} rules", rules.len());
    Ok(ExitCode::SUCCESS)
}

fn print_rule(rule: &Rule) {
    let enforcement = if rule.enforcement().is_blocking() {
        rule.enforcement().as_str().red().bold()
    } else {
        rule.enforcement().as_str().normal()
    };

    println!();
    println!(
        "{} [{}, {}, {}]",
        rule.name().bold(),
        enforcement,
        rule.priority(),
        rule.rule_type()
    );
    if !rule.description().is_empty() {
        println!("  {}", rule.description().dimmed());
    }
    println!(
        "  triggers: {} keywords, {} intents, {} file patterns, {} exclusions",
        rule.keywords().len(),
        rule.intents().len(),
        rule.file_patterns().len(),
        rule.exclude_patterns().len()
    );
    if let Some(var) = rule.env_override() {
        println!("  skipped while {} is set", var);
    }
}
