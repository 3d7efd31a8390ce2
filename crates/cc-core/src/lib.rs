//! Core domain logic for the computer club.
//!
//! This crate contains the club state machine and everything it owns:
//! - Configuration: table count, working hours and hourly price
//! - Registries: client conditions, table occupancy and the wait queue
//! - Billing: per-table revenue and occupied time, rounded up to started hours
//! - Processing: applying log events and the closing sweep
//!
//! Nothing here does I/O; reading the log and printing the results is up to
//! the caller.

pub mod client;
mod club;
pub mod config;
mod error;
pub mod event;
pub mod ledger;
mod outcome;
pub mod queue;
pub mod tables;
pub mod types;

pub use client::{ClientCondition, ClientRegistry};
pub use club::Club;
pub use config::ClubConfig;
pub use error::{ClubError, ConfigError};
pub use event::{ActionError, Event, EventAction};
pub use ledger::{BillingLedger, TableLedgerEntry};
pub use outcome::{ClosingReport, Decision, Notice, Rejection, TableSummary};
pub use queue::WaitQueue;
pub use tables::TableRegistry;
pub use types::{ClientId, TableNumber, ValidationError};
