//! Check command: show the full decision for a prompt

use crate::console::CliConsole;
use crate::context::CommandContext;
use colored::*;
use serde_json::json;
use skillgate_core::{Decision, HookResponse, MatchResult, Resolver};
use std::path::Path;
use std::process::ExitCode;

/// Evaluate `prompt` against the discovered rules and print every match
pub fn run(
    prompt: &str,
    files: &[String],
    json: bool,
    rules_path: Option<&Path>,
    project_dir: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let context = CommandContext::new(rules_path, project_dir, None);
    let rules = context.load_rules();
    let request = context.request(&rules, prompt, files.to_vec());
    let decision = Resolver::new().resolve(&rules, &request);
    let response = HookResponse::from_decision(&decision);

    if json {
        let output = json!({
            "source": rules.source(),
            "decision": decision,
            "response": response,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(ExitCode::SUCCESS);
    }

    let console = CliConsole::new();
    console.header(
        &format!("Skill activation ({} rules loaded)", rules.len()),
        rules.source(),
    );

    if decision.is_empty() {
        console.success("No skills matched");
        return Ok(ExitCode::SUCCESS);
    }

    print_decision(&decision);

    if let Some(directive) = response.directive() {
        println!();
        console.warn(&directive);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_decision(decision: &Decision<'_>) {
    if !decision.blocking.is_empty() {
        println!();
        println!("{}", "Blocking".red().bold());
        for result in &decision.blocking {
            print_match(result, true);
        }
    }

    if !decision.suggested.is_empty() {
        let shown = decision.displayed_suggestions().len();
        println!();
        println!(
            "{} {}",
            "Suggested".cyan().bold(),
            format!("(top {} of {} shown)", shown, decision.suggested.len()).dimmed()
        );
        for (index, result) in decision.suggested.iter().enumerate() {
            print_match(result, index < shown);
        }
    }
}

fn print_match(result: &MatchResult<'_>, displayed: bool) {
    let marker = if displayed { "*".green() } else { " ".normal() };
    println!(
        "  {} {} {} [{}, {}] {}",
        marker,
        result.name().bold(),
        format!("score {}", result.score).yellow(),
        result.rule.enforcement().as_str(),
        result.rule.priority(),
        result.reasons.join(", ").dimmed()
    );
}
