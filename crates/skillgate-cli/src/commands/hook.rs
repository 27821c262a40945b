//! Hook mode
//!
//! Reads the prompt payload on stdin and answers on stdout:
//! - blocking match: `{"decision": "block", "reason": "..."}`
//! - suggestions: logged, and printed as a context banner with `--surface`
//! - nothing: no output
//!
//! Every outcome exits 0. The only failure is not being able to read stdin.

use anyhow::Context;
use serde::{Deserialize, Deserializer};
use skillgate_core::{HookResponse, Resolver};
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::context::CommandContext;

/// Prompt payload sent by the host
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookPayload {
    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default, alias = "context_files", deserialize_with = "null_as_empty")]
    pub context_files: Vec<String>,

    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl HookPayload {
    /// Decode raw stdin bytes; invalid UTF-8 is treated as "no prompt"
    pub fn from_bytes(raw: &[u8]) -> Self {
        match std::str::from_utf8(raw) {
            Ok(text) => Self::parse(text),
            Err(e) => {
                warn!("Ignoring hook payload that is not UTF-8: {}", e);
                Self::default()
            }
        }
    }

    /// Parse a payload; anything unparseable is treated as "no prompt"
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(raw).unwrap_or_else(|e| {
            warn!("Ignoring unparseable hook payload: {}", e);
            Self::default()
        })
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Evaluate a payload into the response the hook should give
pub fn evaluate(
    payload: &HookPayload,
    rules_path: Option<&Path>,
    project_dir: Option<&Path>,
) -> HookResponse {
    let Some(prompt) = payload.prompt() else {
        return HookResponse::Silent;
    };

    let context = CommandContext::new(rules_path, project_dir, payload.cwd.as_deref());
    let rules = context.load_rules();
    if rules.is_empty() {
        return HookResponse::Silent;
    }

    let request = context.request(&rules, prompt, payload.context_files.clone());
    let decision = Resolver::new().resolve(&rules, &request);
    HookResponse::from_decision(&decision)
}

/// Run hook mode against stdin/stdout
pub fn run(
    surface: bool,
    rules_path: Option<&Path>,
    project_dir: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let mut raw = Vec::new();
    std::io::stdin()
        .read_to_end(&mut raw)
        .context("Failed to read hook payload from stdin")?;

    let payload = HookPayload::from_bytes(&raw);

    let response = match panic::catch_unwind(AssertUnwindSafe(|| {
        evaluate(&payload, rules_path, project_dir)
    })) {
        Ok(response) => response,
        Err(_) => {
            error!("Skill activation failed internally, continuing without a decision");
            return Ok(ExitCode::SUCCESS);
        }
    };

    if let Some(output) = render(&response, surface) {
        println!("{}", output);
    }
    Ok(ExitCode::SUCCESS)
}

/// Stdout text for a response, if any
pub fn render(response: &HookResponse, surface: bool) -> Option<String> {
    match response {
        HookResponse::Block { .. } => {
            info!("{}", response.summary());
            response.hook_json().map(|payload| payload.to_string())
        }
        HookResponse::Advisory { .. } => {
            info!("{}", response.summary());
            if surface {
                response.advisory_banner()
            } else {
                None
            }
        }
        HookResponse::Silent => None,
    }
}
