//! Priority scoring engine
//!
//! The engine is a pure function of (task batch, strategy, today): it
//! assigns positional IDs where missing, detects dependency cycles once
//! over the whole batch, computes a four-factor base score plus a
//! strategy bonus per task, penalizes cycle members, and returns the
//! batch sorted by descending score. The caller's slice is never
//! mutated.
//!
//! "Today" is always an explicit parameter; only the CLI boundary reads
//! the real clock. This keeps every scoring path deterministic under test.

use chrono::NaiveDate;

use super::graph::DependencyGraph;
use super::id::TaskId;
use super::strategy::Strategy;
use super::task::{Explanations, ScoredTask, Task};

/// Flat score penalty for tasks participating in a dependency cycle
pub const CYCLE_PENALTY: i64 = 20;

/// Ceiling for the dependency-count bonus
const DEPENDENCY_BONUS_CAP: i64 = 30;

/// Stand-in day count for tasks without a usable due date
const FAR_FUTURE_DAYS: i64 = 9999;

/// Note appended to the dependencies explanation of cycle members
const CYCLE_NOTE: &str = " | In circular dependency: -20";

/// Assigns sequential 1-based IDs, in input order, to tasks lacking one
pub fn assign_ids(tasks: &mut [Task]) {
    for (position, task) in tasks.iter_mut().enumerate() {
        if task.id.is_none() {
            task.id = Some(TaskId(position as u64 + 1));
        }
    }
}

/// Computes the base score and its per-factor explanations for one task
///
/// The four factors (urgency, importance, effort, dependency count) are
/// independent; every factor contributes an explanation even when its
/// bonus is zero.
pub fn base_score(task: &Task, today: NaiveDate) -> (i64, Explanations) {
    let mut score = 0;
    let mut explanations = Explanations::default();

    match task.due_date.days_until(today) {
        None => {
            explanations.urgency =
                "Due date missing/invalid: treated as low urgency (+0)".to_string();
        }
        Some(days) if days < 0 => {
            score += 100;
            explanations.urgency = format!("Overdue by {} day(s): +100", -days);
        }
        Some(days) if days <= 1 => {
            score += 70;
            explanations.urgency = "Due within 1 day: +70".to_string();
        }
        Some(days) if days <= 3 => {
            score += 50;
            explanations.urgency = "Due within 3 days: +50".to_string();
        }
        Some(days) if days <= 7 => {
            score += 30;
            explanations.urgency = "Due within a week: +30".to_string();
        }
        Some(_) => {
            score += 10;
            explanations.urgency = "Due later than a week: +10".to_string();
        }
    }

    let importance = task.effective_importance();
    score += importance * 5;
    explanations.importance = format!("Importance {}/10: +{}", importance, importance * 5);

    let hours = task.effective_hours();
    if hours < 1.0 {
        score += 15;
        explanations.effort = "Very small task (<1 hour): +15".to_string();
    } else if hours < 2.0 {
        score += 10;
        explanations.effort = "Small task (<2 hours): +10".to_string();
    } else if hours <= 4.0 {
        score += 5;
        explanations.effort = "Medium (2-4 hours): +5".to_string();
    } else {
        explanations.effort = "Large task (>4 hours): +0".to_string();
    }

    let dep_count = task.dependencies.len();
    if dep_count > 0 {
        let bonus = (dep_count as i64 * 5).min(DEPENDENCY_BONUS_CAP);
        score += bonus;
        explanations.dependencies = format!("{} dependency(ies): +{}", dep_count, bonus);
    } else {
        explanations.dependencies = "No dependencies: +0".to_string();
    }

    (score, explanations)
}

/// Applies the strategy-specific bonus to a base score
pub fn apply_strategy(score: i64, task: &Task, strategy: Strategy, today: NaiveDate) -> i64 {
    let importance = task.effective_importance();
    let hours = task.effective_hours();
    let days = task.due_date.days_until(today).unwrap_or(FAR_FUTURE_DAYS);

    match strategy {
        Strategy::FastestWins => {
            if hours <= 1.0 {
                score + 30
            } else if hours <= 2.0 {
                score + 20
            } else {
                score
            }
        }
        Strategy::HighImpact => score + importance * 2,
        Strategy::DeadlineDriven => {
            if days <= 1 {
                score + 40
            } else if days <= 3 {
                score + 25
            } else if days <= 7 {
                score + 10
            } else {
                score
            }
        }
        Strategy::SmartBalance => {
            // Bonuses are non-exclusive; each true condition stacks.
            let mut score = score;
            if importance >= 8 {
                score += 10;
            }
            if hours <= 2.0 {
                score += 10;
            }
            if days <= 3 {
                score += 10;
            }
            score
        }
    }
}

/// Scores and ranks a batch of tasks under the given strategy
///
/// Every input task produces exactly one output record. The result is
/// sorted by descending score; relative order among equal scores is
/// unspecified.
pub fn score_tasks(tasks: &[Task], strategy: Strategy, today: NaiveDate) -> Vec<ScoredTask> {
    let mut batch: Vec<Task> = tasks.to_vec();
    assign_ids(&mut batch);

    let cycle_ids = DependencyGraph::from_tasks(&batch).cycle_members();

    let mut scored: Vec<ScoredTask> = batch
        .iter()
        .map(|task| {
            // assign_ids above guarantees every batch member has an id
            let id = task.id.unwrap_or_default();

            let (base, mut explanations) = base_score(task, today);
            let mut final_score = apply_strategy(base, task, strategy, today);

            let in_cycle = cycle_ids.contains(&id);
            if in_cycle {
                final_score -= CYCLE_PENALTY;
                explanations.dependencies.push_str(CYCLE_NOTE);
            }

            ScoredTask {
                id,
                title: task.title.clone(),
                due_date: task.due_date.clone(),
                importance: task.effective_importance(),
                estimated_hours: task.effective_hours(),
                dependencies: task.dependencies.clone(),
                score: round2(final_score as f64),
                explanations,
                in_cycle,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Rounds to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::DueDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn due_in(days: i64) -> NaiveDate {
        today() + chrono::Duration::days(days)
    }

    #[test]
    fn urgency_tiers() {
        let cases = [
            (-1, 100, "Overdue by 1 day(s): +100"),
            (0, 70, "Due within 1 day: +70"),
            (1, 70, "Due within 1 day: +70"),
            (2, 50, "Due within 3 days: +50"),
            (3, 50, "Due within 3 days: +50"),
            (4, 30, "Due within a week: +30"),
            (7, 30, "Due within a week: +30"),
            (8, 10, "Due later than a week: +10"),
        ];

        for (days, bonus, text) in cases {
            // Isolate urgency: importance 0 and large effort contribute nothing
            let task = Task::new("T")
                .with_due(due_in(days))
                .with_importance(0)
                .with_hours(8.0);
            let (score, explanations) = base_score(&task, today());
            assert_eq!(score, bonus, "days={}", days);
            assert_eq!(explanations.urgency, text, "days={}", days);
        }
    }

    #[test]
    fn due_today_is_within_one_day_not_overdue() {
        let task = Task::new("T").with_due(today());
        let (_, explanations) = base_score(&task, today());
        assert_eq!(explanations.urgency, "Due within 1 day: +70");
    }

    #[test]
    fn missing_date_scores_zero_urgency() {
        let task = Task::new("T").with_importance(0).with_hours(8.0);
        let (score, explanations) = base_score(&task, today());
        assert_eq!(score, 0);
        assert_eq!(
            explanations.urgency,
            "Due date missing/invalid: treated as low urgency (+0)"
        );
    }

    #[test]
    fn invalid_date_scores_like_missing() {
        let task = Task {
            due_date: DueDate::Invalid("soonish".into()),
            ..Task::new("T").with_importance(0).with_hours(8.0)
        };
        let (score, _) = base_score(&task, today());
        assert_eq!(score, 0);
    }

    #[test]
    fn importance_contributes_five_per_point() {
        let task = Task::new("T").with_importance(7).with_hours(8.0);
        let (score, explanations) = base_score(&task, today());
        assert_eq!(score, 35);
        assert_eq!(explanations.importance, "Importance 7/10: +35");
    }

    #[test]
    fn absent_importance_defaults_to_five() {
        let task = Task::new("T").with_hours(8.0);
        let (score, explanations) = base_score(&task, today());
        assert_eq!(score, 25);
        assert_eq!(explanations.importance, "Importance 5/10: +25");
    }

    #[test]
    fn effort_tiers() {
        let cases = [
            (0.5, 15, "Very small task (<1 hour): +15"),
            (1.0, 10, "Small task (<2 hours): +10"),
            (1.9, 10, "Small task (<2 hours): +10"),
            (2.0, 5, "Medium (2-4 hours): +5"),
            (4.0, 5, "Medium (2-4 hours): +5"),
            (4.1, 0, "Large task (>4 hours): +0"),
        ];

        for (hours, bonus, text) in cases {
            let task = Task::new("T").with_importance(0).with_hours(hours);
            let (score, explanations) = base_score(&task, today());
            assert_eq!(score, bonus, "hours={}", hours);
            assert_eq!(explanations.effort, text, "hours={}", hours);
        }
    }

    #[test]
    fn dependency_bonus_caps_at_thirty() {
        let small = Task::new("T")
            .with_importance(0)
            .with_hours(8.0)
            .with_dependencies([1, 2]);
        let (score, explanations) = base_score(&small, today());
        assert_eq!(score, 10);
        assert_eq!(explanations.dependencies, "2 dependency(ies): +10");

        let large = Task::new("T")
            .with_importance(0)
            .with_hours(8.0)
            .with_dependencies(1..=9);
        let (score, explanations) = base_score(&large, today());
        assert_eq!(score, 30);
        assert_eq!(explanations.dependencies, "9 dependency(ies): +30");
    }

    #[test]
    fn no_dependencies_explained_as_zero() {
        let (_, explanations) = base_score(&Task::new("T"), today());
        assert_eq!(explanations.dependencies, "No dependencies: +0");
    }

    #[test]
    fn fastest_wins_bonus_tiers() {
        let quick = Task::new("T").with_hours(0.5);
        let short = Task::new("T").with_hours(2.0);
        let long = Task::new("T").with_hours(6.0);

        assert_eq!(apply_strategy(0, &quick, Strategy::FastestWins, today()), 30);
        assert_eq!(apply_strategy(0, &short, Strategy::FastestWins, today()), 20);
        assert_eq!(apply_strategy(0, &long, Strategy::FastestWins, today()), 0);
    }

    #[test]
    fn high_impact_doubles_importance() {
        let task = Task::new("T").with_importance(9);
        assert_eq!(apply_strategy(100, &task, Strategy::HighImpact, today()), 118);
    }

    #[test]
    fn deadline_driven_bonus_tiers() {
        let cases = [(0, 40), (1, 40), (3, 25), (7, 10), (8, 0)];
        for (days, bonus) in cases {
            let task = Task::new("T").with_due(due_in(days));
            assert_eq!(
                apply_strategy(0, &task, Strategy::DeadlineDriven, today()),
                bonus,
                "days={}",
                days
            );
        }
    }

    #[test]
    fn deadline_driven_treats_missing_date_as_far_future() {
        let task = Task::new("T");
        assert_eq!(apply_strategy(0, &task, Strategy::DeadlineDriven, today()), 0);
    }

    #[test]
    fn smart_balance_bonuses_stack() {
        // importance >= 8, hours <= 2, days <= 3 all true
        let task = Task::new("T")
            .with_importance(8)
            .with_hours(1.0)
            .with_due(due_in(2));
        assert_eq!(apply_strategy(0, &task, Strategy::SmartBalance, today()), 30);

        // Only the effort condition holds
        let task = Task::new("T").with_importance(3).with_hours(1.0);
        assert_eq!(apply_strategy(0, &task, Strategy::SmartBalance, today()), 10);
    }

    #[test]
    fn assign_ids_fills_gaps_in_input_order() {
        let mut tasks = vec![
            Task::new("A"),
            Task::new("B").with_id(7),
            Task::new("C"),
        ];
        assign_ids(&mut tasks);
        assert_eq!(tasks[0].id, Some(TaskId(1)));
        assert_eq!(tasks[1].id, Some(TaskId(7)));
        assert_eq!(tasks[2].id, Some(TaskId(3)));
    }

    #[test]
    fn overdue_task_ranks_first_under_smart_balance() {
        let tasks = vec![
            Task::new("Old")
                .with_due(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
                .with_importance(5)
                .with_hours(2.0),
            Task::new("Future")
                .with_due(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap())
                .with_importance(5)
                .with_hours(2.0),
        ];

        let scored = score_tasks(&tasks, Strategy::SmartBalance, today());
        assert_eq!(scored[0].title.as_deref(), Some("Old"));
        assert!(scored[0].score > scored[1].score);
    }

    #[test]
    fn fastest_wins_prefers_quick_task() {
        let tasks = vec![
            Task::new("Long")
                .with_due(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap())
                .with_importance(7)
                .with_hours(6.0),
            Task::new("Quick")
                .with_due(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap())
                .with_importance(7)
                .with_hours(0.5),
        ];

        let scored = score_tasks(&tasks, Strategy::FastestWins, today());
        assert_eq!(scored[0].title.as_deref(), Some("Quick"));
        assert!(scored[0].score > scored[1].score);
    }

    #[test]
    fn cycle_members_are_penalized_and_flagged() {
        let cyclic = vec![
            Task::new("A").with_id(1).with_dependencies([2]),
            Task::new("B").with_id(2).with_dependencies([1]),
            Task::new("C").with_id(3),
        ];

        let scored = score_tasks(&cyclic, Strategy::SmartBalance, today());

        let a = scored.iter().find(|t| t.id == TaskId(1)).unwrap();
        let b = scored.iter().find(|t| t.id == TaskId(2)).unwrap();
        let c = scored.iter().find(|t| t.id == TaskId(3)).unwrap();

        assert!(a.in_cycle);
        assert!(b.in_cycle);
        assert!(!c.in_cycle);
        assert!(c.score > a.score);
        assert!(a
            .explanations
            .dependencies
            .ends_with("| In circular dependency: -20"));
        assert!(!c.explanations.dependencies.contains("circular"));
    }

    #[test]
    fn cycle_penalty_is_exactly_twenty() {
        let cyclic = vec![
            Task::new("A").with_id(1).with_dependencies([2]),
            Task::new("B").with_id(2).with_dependencies([1]),
        ];
        // Same tasks with the edges removed, dependency bonus aside
        let acyclic = vec![
            Task::new("A").with_id(1).with_dependencies([2]),
            Task::new("B").with_id(2),
        ];

        let scored_cyclic = score_tasks(&cyclic, Strategy::SmartBalance, today());
        let scored_acyclic = score_tasks(&acyclic, Strategy::SmartBalance, today());

        let a_cyclic = scored_cyclic.iter().find(|t| t.id == TaskId(1)).unwrap();
        let a_acyclic = scored_acyclic.iter().find(|t| t.id == TaskId(1)).unwrap();

        // Task A keeps its one-dependency bonus in both batches; only the
        // penalty differs.
        assert_eq!(a_acyclic.score - a_cyclic.score, CYCLE_PENALTY as f64);
    }

    #[test]
    fn self_loop_is_flagged() {
        let tasks = vec![Task::new("Loop").with_id(1).with_dependencies([1])];
        let scored = score_tasks(&tasks, Strategy::SmartBalance, today());
        assert!(scored[0].in_cycle);
    }

    #[test]
    fn input_is_not_mutated() {
        let tasks = vec![Task::new("A"), Task::new("B")];
        let _ = score_tasks(&tasks, Strategy::SmartBalance, today());
        assert!(tasks[0].id.is_none());
        assert!(tasks[1].id.is_none());
    }

    #[test]
    fn every_input_task_produces_one_output() {
        let tasks = vec![
            Task::new("A"),
            Task::new("B").with_id(10),
            Task::new("C").with_dependencies([99]),
        ];
        let scored = score_tasks(&tasks, Strategy::HighImpact, today());
        assert_eq!(scored.len(), 3);

        let mut ids: Vec<u64> = scored.iter().map(|t| t.id.value()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 3, 10]);
    }

    #[test]
    fn output_is_sorted_descending() {
        let tasks = vec![
            Task::new("low").with_importance(1).with_hours(8.0),
            Task::new("high").with_importance(10).with_hours(0.5),
            Task::new("mid").with_importance(5).with_hours(3.0),
        ];
        let scored = score_tasks(&tasks, Strategy::SmartBalance, today());
        for pair in scored.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn scoring_is_deterministic_for_a_fixed_clock() {
        let tasks = vec![
            Task::new("A").with_due(due_in(2)).with_importance(8),
            Task::new("B").with_hours(0.5).with_dependencies([1]),
        ];
        let first = score_tasks(&tasks, Strategy::DeadlineDriven, today());
        let second = score_tasks(&tasks, Strategy::DeadlineDriven, today());
        assert_eq!(first, second);
    }

    #[test]
    fn dangling_dependency_still_earns_count_bonus() {
        // The dependency bonus counts references; cycle detection ignores them
        let tasks = vec![Task::new("A").with_id(1).with_dependencies([99])];
        let scored = score_tasks(&tasks, Strategy::SmartBalance, today());
        assert!(!scored[0].in_cycle);
        assert_eq!(scored[0].explanations.dependencies, "1 dependency(ies): +5");
    }
}
