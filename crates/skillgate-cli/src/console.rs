//! Terminal reporting for the interactive commands
//!
//! Hook mode never goes through here; its stdout belongs to the hook
//! protocol.

use colored::*;
use skillgate_core::rules::SkippedRule;
use skillgate_core::RuleSource;

/// Colored report writer shared by `check`, `rules` and `validate`
pub struct CliConsole {
    quiet: bool,
}

impl CliConsole {
    pub const fn new() -> Self {
        Self { quiet: false }
    }

    /// Swallow stdout lines; errors still reach stderr
    pub const fn quiet() -> Self {
        Self { quiet: true }
    }

    /// Report title followed by where the rules came from
    pub fn header(&self, title: &str, source: &RuleSource) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", title.bold().underline());
        println!("{} {}", "rules:".dimmed(), source);
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green().bold(), message.green());
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "⚠".yellow().bold(), message.yellow());
        }
    }

    /// Warning tied to one rule
    pub fn rule_warning(&self, rule: &str, message: &str) {
        self.warn(&format!("{}: {}", rule.bold(), message));
    }

    /// A rule entry the loader rejected
    pub fn skipped(&self, skipped: &SkippedRule) {
        self.error(&format!("{} skipped: {}", skipped.name.bold(), skipped.reason));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }
}
