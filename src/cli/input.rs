//! Request decoding and structural validation for CLI commands
//!
//! Every command accepts the same JSON shapes the original web API did:
//! either an envelope `{"strategy": "...", "tasks": [...]}` or a bare
//! task array. A payload that does not decode at all is a client error;
//! so is a batch where any task fails the required-field check. Both are
//! reported before the engine ever runs.

use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::output::Output;
use crate::domain::{validate_batch, Strategy, Task};
use crate::storage::Config;

/// The two accepted request shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RankRequest {
    Envelope {
        #[serde(default)]
        strategy: Option<Strategy>,
        #[serde(default)]
        tasks: Vec<Task>,
    },
    List(Vec<Task>),
}

/// A decoded request: optional strategy plus the task batch
#[derive(Debug)]
pub struct Request {
    pub strategy: Option<Strategy>,
    pub tasks: Vec<Task>,
}

/// Reads and decodes a request from a file, or stdin when the path is `-`
pub fn read_request(path: &str) -> Result<Request> {
    let raw = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read tasks from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read tasks file: {}", path))?
    };

    parse_request(&raw)
}

/// Decodes a raw JSON request body
pub fn parse_request(raw: &str) -> Result<Request> {
    let request: RankRequest = serde_json::from_str(raw).context("Invalid JSON body")?;

    Ok(match request {
        RankRequest::Envelope { strategy, tasks } => Request { strategy, tasks },
        RankRequest::List(tasks) => Request {
            strategy: None,
            tasks,
        },
    })
}

/// Picks the effective strategy: CLI flag, then request envelope, then config
pub fn resolve_strategy(
    flag: Option<Strategy>,
    envelope: Option<Strategy>,
    config: &Config,
) -> Strategy {
    flag.or(envelope).unwrap_or(config.default_strategy)
}

/// Validates the batch, reporting all issues and failing if any exist
pub fn ensure_valid(tasks: &[Task], output: &Output) -> Result<()> {
    let issues = validate_batch(tasks);
    if issues.is_empty() {
        return Ok(());
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "error": "Validation failed",
            "details": &issues,
        }));
    } else {
        for issue in &issues {
            for error in &issue.errors {
                eprintln!("task[{}]: {}", issue.index, error);
            }
        }
    }

    anyhow::bail!("Validation failed for {} task(s)", issues.len())
}
