//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `rank` | Score and order a full batch |
//! | `suggest` | Top-N picks with flattened explanations |
//! | `check` | Cycle report without scoring |
//! | `ticket save` / `ticket list` | Archive and inspect rankings |
//!
//! All commands read JSON from a file or stdin (`-`) and support
//! `--format text|json` plus `--verbose` for debug output on stderr.
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod check;
mod input;
mod output;
mod rank;
mod suggest;
mod ticket_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
