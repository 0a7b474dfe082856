//! Triage CLI - Dependency-aware task prioritization
//!
//! Triage ranks a batch of work items by computed priority under a
//! choice of strategy (smart balance, fastest wins, high impact,
//! deadline driven), detecting and penalizing circular dependencies
//! along the way. Every score comes with a per-factor explanation.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{detect_cycles, score_tasks, ScoredTask, Strategy, Task, TaskId};
