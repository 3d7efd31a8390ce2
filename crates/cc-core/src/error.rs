//! Fatal errors.
//!
//! Business-rule violations are not errors: they are reported as
//! [`Rejection`](crate::Rejection) values and processing continues. Everything
//! here aborts the run.

use chrono::NaiveTime;
use thiserror::Error;

use crate::types::{ClientId, TableNumber};

/// Invalid club configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The club must have at least one table.
    #[error("club must have at least one table")]
    NoTables,

    #[error("club has {tables} tables, at most {max} are supported")]
    TooManyTables { tables: usize, max: usize },

    /// Opening time is not strictly before closing time.
    #[error("opening time {opens_at} must be before closing time {closes_at}")]
    InvalidHours {
        opens_at: NaiveTime,
        closes_at: NaiveTime,
    },
}

/// Broken invariant of the club state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClubError {
    /// An event is earlier than the one applied before it.
    #[error("event at {time} is earlier than previous event at {previous}")]
    OutOfOrder {
        time: NaiveTime,
        previous: NaiveTime,
    },

    /// A table index outside the ledger.
    #[error("table {table} does not exist (club has {tables} tables)")]
    NoSuchTable {
        table: TableNumber,
        tables: usize,
    },

    /// Seating a client at a table somebody already holds.
    #[error("table {table} is already held by {owner}")]
    TableTaken { table: TableNumber, owner: ClientId },

    /// Freeing or settling a table nobody holds.
    #[error("table {table} is not occupied")]
    NotOccupied { table: TableNumber },

    /// Starting billing on a table whose previous occupancy is still open.
    #[error("billing for table {table} already started at {started_at}")]
    AlreadyStarted {
        table: TableNumber,
        started_at: NaiveTime,
    },

    /// Settling an occupancy that ends before it started.
    #[error("table {table} settled at {time}, before occupancy started at {started_at}")]
    NegativeElapsed {
        table: TableNumber,
        started_at: NaiveTime,
        time: NaiveTime,
    },

    /// Revenue does not fit into the ledger.
    #[error("revenue overflow on table {table}")]
    RevenueOverflow { table: TableNumber },

    /// Queue insertion that the processor should have ruled out.
    #[error("cannot queue {client}: queue is full or already holds the client")]
    QueueRejected { client: ClientId },
}
