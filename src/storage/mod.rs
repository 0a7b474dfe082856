//! # Storage Layer
//!
//! Persistence for everything outside the scoring engine (the engine
//! itself never touches storage).
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | platform config dir (`triage/config.toml`) |
//! | Tickets | JSONL (one JSON per line) | platform data dir (`triage/tickets.jsonl`) |
//!
//! [`TicketStore`] uses file locking (`fs2`) for concurrent access safety.

mod config;
mod tickets;

pub use config::Config;
pub use tickets::{Ticket, TicketStore};
