//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{check, rank, suggest, ticket_cmd};
use crate::domain::Strategy;

#[derive(Parser)]
#[command(name = "triage")]
#[command(author, version, about = "Dependency-aware task prioritization")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a batch of tasks by computed priority
    ///
    /// Input is JSON: either {"strategy": "...", "tasks": [...]} or a
    /// bare task array.
    Rank {
        /// JSON input file, or '-' for stdin
        #[arg(default_value = "-")]
        file: String,

        /// Strategy override (falls back to the request, then config)
        #[arg(long, short)]
        strategy: Option<Strategy>,
    },

    /// Suggest the highest-priority tasks with flattened explanations
    Suggest {
        /// JSON input file, or '-' for stdin
        #[arg(default_value = "-")]
        file: String,

        /// Strategy override (falls back to the request, then config)
        #[arg(long, short)]
        strategy: Option<Strategy>,

        /// Number of suggestions to show
        #[arg(long, default_value = "3")]
        top: usize,
    },

    /// Report tasks caught in dependency cycles
    Check {
        /// JSON input file, or '-' for stdin
        #[arg(default_value = "-")]
        file: String,
    },

    /// Archive and inspect ranked tickets
    #[command(subcommand)]
    Ticket(ticket_cmd::TicketCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Triage CLI starting");

    match cli.command {
        Commands::Rank { file, strategy } => rank::run(&output, &file, strategy)?,
        Commands::Suggest {
            file,
            strategy,
            top,
        } => suggest::run(&output, &file, strategy, top)?,
        Commands::Check { file } => check::run(&output, &file)?,
        Commands::Ticket(cmd) => ticket_cmd::run(cmd, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
