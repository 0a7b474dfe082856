//! Triage CLI - Dependency-aware task prioritization

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = triage_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
