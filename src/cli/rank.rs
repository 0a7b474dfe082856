//! Rank command: score and order a full batch

use anyhow::Result;
use chrono::Local;

use super::input;
use super::output::Output;
use crate::domain::{score_tasks, Strategy};
use crate::storage::Config;

/// Ranks a batch of tasks and prints the full scored sequence
pub fn run(output: &Output, file: &str, strategy_flag: Option<Strategy>) -> Result<()> {
    let config = Config::load()?;
    let request = input::read_request(file)?;
    output.verbose_ctx("rank", &format!("Decoded {} task(s)", request.tasks.len()));

    input::ensure_valid(&request.tasks, output)?;

    let strategy = input::resolve_strategy(strategy_flag, request.strategy, &config);
    // The clock is read here, once, at the boundary; the engine itself is pure
    let today = Local::now().date_naive();
    output.verbose_ctx("rank", &format!("Scoring under '{}' for {}", strategy, today));

    let scored = score_tasks(&request.tasks, strategy, today);

    if output.is_json() {
        output.data(&serde_json::json!({ "tasks": scored }));
        return Ok(());
    }

    println!("Ranked tasks ({}, strategy: {}):", scored.len(), strategy.label());
    println!("{:<5} {:<8} {:<6} TITLE", "RANK", "SCORE", "ID");
    println!("{}", "-".repeat(60));

    for (position, task) in scored.iter().enumerate() {
        let marker = if task.in_cycle { "  [cycle]" } else { "" };
        println!(
            "{:<5} {:<8.2} {:<6} {}{}",
            position + 1,
            task.score,
            task.id,
            task.title.as_deref().unwrap_or("(untitled)"),
            marker
        );

        if output.is_verbose() {
            println!("      {}", task.explanations.summary());
        }
    }

    Ok(())
}
