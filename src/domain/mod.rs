//! Domain models and the scoring engine
//!
//! Contains the core prioritization logic without any I/O concerns.

mod graph;
mod id;
mod score;
mod strategy;
mod task;
mod validate;

pub use graph::{detect_cycles, DependencyGraph};
pub use id::{IdError, TaskId, TicketId};
pub use score::{apply_strategy, assign_ids, base_score, score_tasks, CYCLE_PENALTY};
pub use strategy::Strategy;
pub use task::{DueDate, Explanations, Hours, Importance, ScoredTask, Task};
pub use validate::{validate_batch, validate_task, ValidationIssue};
