//! CLI argument definitions using clap
//!
//! - skillgate                    # Hook filter (reads the prompt payload on stdin)
//! - skillgate hook --surface     # Hook filter, also printing suggestions
//! - skillgate check "prompt"     # Evaluate a prompt directly
//! - skillgate rules              # List the loaded rules
//! - skillgate validate [path]    # Strictly check a rule file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "skillgate")]
#[command(about = "Skillgate - decides which skills to surface for a prompt")]
#[command(
    long_about = r#"Skillgate - decides which skills to surface for a prompt

USAGE:
  skillgate                      # Hook mode: read {"prompt": ...} from stdin
  skillgate check "your prompt"  # Show the full decision for a prompt
  skillgate rules                # List loaded rules
  skillgate validate [path]      # Validate a rule file

Rules are read from <project>/.claude/skills/skill-rules.json, falling back
to ~/.claude/skills/skill-rules.json."#
)]
#[command(version)]
pub struct Cli {
    /// Rule file to use instead of the project-level one
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Project directory used to locate project rules
    #[arg(long, env = "CLAUDE_PROJECT_DIR", global = true)]
    pub project_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Read a prompt payload from stdin and emit the hook response
    #[command(verbatim_doc_comment)]
    Hook {
        /// Also print suggestions to stdout as context for the assistant
        #[arg(long)]
        surface: bool,
    },

    /// Evaluate a prompt and show every match with its score
    #[command(verbatim_doc_comment)]
    Check {
        /// Prompt text to evaluate
        prompt: String,

        /// Recently touched file (repeatable)
        #[arg(long = "file", short = 'f')]
        files: Vec<String>,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the rules that would be used
    #[command(verbatim_doc_comment)]
    Rules {
        /// Print the rules as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a rule file, reporting skipped rules and suspicious patterns
    #[command(verbatim_doc_comment)]
    Validate {
        /// Rule file to check (defaults to the discovered one)
        path: Option<PathBuf>,
    },
}
