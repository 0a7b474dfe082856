//! JSONL storage for archived tickets
//!
//! A ticket freezes one ranked task (with the strategy that produced the
//! ranking) for later reference. Tickets are stored append-only, one JSON
//! object per line, with file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::{DueDate, ScoredTask, Strategy, TicketId};

/// An archived ranking entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,

    /// Strategy the ranking was computed under
    pub strategy: Strategy,

    /// Task title at archive time
    pub title: String,

    /// Due date carried over from the task
    pub due_date: DueDate,

    /// Importance used for scoring
    pub importance: i64,

    /// Effort estimate used for scoring
    pub estimated_hours: f64,

    /// Final computed score
    pub score: f64,

    /// When the ticket was archived
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Builds a ticket from a scored task
    pub fn from_scored(scored: &ScoredTask, strategy: Strategy, created_at: DateTime<Utc>) -> Self {
        let title = scored.title.clone().unwrap_or_default();
        Self {
            id: TicketId::new(&title, created_at),
            strategy,
            title,
            due_date: scored.due_date.clone(),
            importance: scored.importance,
            estimated_hours: scored.estimated_hours,
            score: scored.score,
            created_at,
        }
    }
}

/// Store for ticket data in JSONL format
pub struct TicketStore {
    path: PathBuf,
}

impl TicketStore {
    /// Creates a ticket store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all tickets from the store, oldest first
    pub fn read_all(&self) -> Result<Vec<Ticket>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open ticket store: {}", self.path.display()))?;

        // Shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on ticket store")?;

        let reader = BufReader::new(&file);
        let mut tickets = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let ticket: Ticket = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse ticket at line {}", line_num + 1))?;

            tickets.push(ticket);
        }

        // Lock is released when file is dropped
        Ok(tickets)
    }

    /// Appends one ticket to the store
    pub fn append(&self, ticket: &Ticket) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open ticket store: {}", self.path.display()))?;

        // Exclusive lock for writing
        file.lock_exclusive()
            .context("Failed to acquire write lock on ticket store")?;

        let json = serde_json::to_string(ticket).context("Failed to serialize ticket")?;
        writeln!(file, "{}", json)
            .with_context(|| format!("Failed to write ticket: {}", self.path.display()))?;

        Ok(())
    }
}
