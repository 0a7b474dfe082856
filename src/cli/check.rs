//! Check command: report dependency cycles without scoring

use anyhow::Result;

use super::input;
use super::output::Output;
use crate::domain::{assign_ids, detect_cycles};

/// Reports which tasks in a batch participate in dependency cycles
pub fn run(output: &Output, file: &str) -> Result<()> {
    let request = input::read_request(file)?;

    // Positional IDs are assigned the same way the ranker does it, so the
    // report matches what `rank` would flag.
    let mut tasks = request.tasks;
    assign_ids(&mut tasks);
    output.verbose_ctx("check", &format!("Inspecting {} task(s)", tasks.len()));

    let mut cycle_ids: Vec<u64> = detect_cycles(&tasks).iter().map(|id| id.value()).collect();
    cycle_ids.sort_unstable();

    if output.is_json() {
        output.data(&serde_json::json!({ "cycles": cycle_ids }));
        return Ok(());
    }

    if cycle_ids.is_empty() {
        println!("No circular dependencies found.");
    } else {
        println!("Tasks in circular dependencies ({}):", cycle_ids.len());
        for id in &cycle_ids {
            let title = tasks
                .iter()
                .find(|t| t.id.map(|tid| tid.value()) == Some(*id))
                .and_then(|t| t.title.as_deref())
                .unwrap_or("(untitled)");
            println!("  {:<6} {}", id, title);
        }
    }

    Ok(())
}
