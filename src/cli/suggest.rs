//! Suggest command: top-N tasks with flattened explanations

use anyhow::Result;
use chrono::Local;

use super::input;
use super::output::Output;
use crate::domain::{score_tasks, Strategy};
use crate::storage::Config;

/// Suggests the highest-priority tasks from a batch
pub fn run(output: &Output, file: &str, strategy_flag: Option<Strategy>, top: usize) -> Result<()> {
    let config = Config::load()?;
    let request = input::read_request(file)?;

    input::ensure_valid(&request.tasks, output)?;

    let strategy = input::resolve_strategy(strategy_flag, request.strategy, &config);
    let today = Local::now().date_naive();
    output.verbose_ctx(
        "suggest",
        &format!("Picking top {} of {} task(s)", top, request.tasks.len()),
    );

    let scored = score_tasks(&request.tasks, strategy, today);
    let picks: Vec<_> = scored.iter().take(top).collect();

    if output.is_json() {
        let suggestions: Vec<_> = picks
            .iter()
            .map(|task| {
                serde_json::json!({
                    "title": &task.title,
                    "due_date": &task.due_date,
                    "score": task.score,
                    "explanation": task.explanations.summary(),
                })
            })
            .collect();

        output.data(&serde_json::json!({
            "today": today.format("%Y-%m-%d").to_string(),
            "strategy": strategy,
            "suggestions": suggestions,
        }));
        return Ok(());
    }

    if picks.is_empty() {
        println!("No tasks to suggest.");
        return Ok(());
    }

    println!("Top {} suggestion(s) (strategy: {}):", picks.len(), strategy.label());
    for (position, task) in picks.iter().enumerate() {
        println!(
            "{}. {} (score {:.2})",
            position + 1,
            task.title.as_deref().unwrap_or("(untitled)"),
            task.score
        );
        println!("   {}", task.explanations.summary());
    }

    Ok(())
}
