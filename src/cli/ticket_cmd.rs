//! Ticket CLI commands

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::input;
use super::output::Output;
use crate::domain::{score_tasks, Strategy};
use crate::storage::{Config, Ticket, TicketStore};

#[derive(Subcommand)]
pub enum TicketCommands {
    /// Score a batch and archive the top-ranked task as a ticket
    Save {
        /// JSON input file, or '-' for stdin
        #[arg(default_value = "-")]
        file: String,

        /// Strategy override (falls back to the request, then config)
        #[arg(long, short)]
        strategy: Option<Strategy>,

        /// Ticket store location
        #[arg(long, env = "TRIAGE_TICKETS")]
        store: Option<PathBuf>,
    },

    /// List archived tickets
    List {
        /// Ticket store location
        #[arg(long, env = "TRIAGE_TICKETS")]
        store: Option<PathBuf>,
    },
}

pub fn run(cmd: TicketCommands, output: &Output) -> Result<()> {
    match cmd {
        TicketCommands::Save {
            file,
            strategy,
            store,
        } => save_ticket(output, &file, strategy, store),
        TicketCommands::List { store } => list_tickets(output, store),
    }
}

fn open_store(override_path: Option<PathBuf>, config: &Config) -> Result<TicketStore> {
    let path = match override_path {
        Some(path) => path,
        None => config.tickets_path()?,
    };
    Ok(TicketStore::new(path))
}

fn save_ticket(
    output: &Output,
    file: &str,
    strategy_flag: Option<Strategy>,
    store_path: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load()?;
    let request = input::read_request(file)?;

    input::ensure_valid(&request.tasks, output)?;

    let strategy = input::resolve_strategy(strategy_flag, request.strategy, &config);
    let today = chrono::Local::now().date_naive();
    let scored = score_tasks(&request.tasks, strategy, today);

    let Some(top) = scored.first() else {
        anyhow::bail!("No tasks to archive");
    };

    let ticket = Ticket::from_scored(top, strategy, Utc::now());
    let store = open_store(store_path, &config)?;
    store.append(&ticket)?;
    output.verbose_ctx("ticket", &format!("Appended to {}", store.path().display()));

    if output.is_json() {
        output.data(&ticket);
    } else {
        output.success(&format!(
            "Archived ticket {} for '{}' (score {:.2}, strategy: {})",
            ticket.id, ticket.title, ticket.score, strategy
        ));
    }

    Ok(())
}

fn list_tickets(output: &Output, store_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(store_path, &config)?;
    let tickets = store.read_all()?;
    output.verbose_ctx("ticket", &format!("Found {} ticket(s)", tickets.len()));

    if output.is_json() {
        output.data(&tickets);
        return Ok(());
    }

    if tickets.is_empty() {
        println!("No tickets archived.");
        return Ok(());
    }

    println!("{:<11} {:<8} {:<16} {:<12} TITLE", "ID", "SCORE", "STRATEGY", "CREATED");
    println!("{}", "-".repeat(70));
    for ticket in &tickets {
        println!(
            "{:<11} {:<8.2} {:<16} {:<12} {}",
            ticket.id,
            ticket.score,
            ticket.strategy,
            ticket.created_at.format("%Y-%m-%d"),
            ticket.title
        );
    }

    Ok(())
}
