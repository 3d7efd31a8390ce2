//! Incoming client events.

use std::fmt;

use chrono::NaiveTime;
use thiserror::Error;

use crate::types::ClientId;

/// What a client asks the club to do.
///
/// `Sit` keeps the table number exactly as written in the log. Numbers outside
/// the club's range are a business rejection, not a malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventAction {
    Arrive,
    Sit { table: i64 },
    Queue,
    Leave,
}

impl EventAction {
    /// Numeric action id used by the log format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Arrive => 1,
            Self::Sit { .. } => 2,
            Self::Queue => 3,
            Self::Leave => 4,
        }
    }

    /// Builds an action from its log id. `table` is only consulted for `Sit`.
    pub const fn from_code(code: u8, table: Option<i64>) -> Result<Self, ActionError> {
        match (code, table) {
            (1, _) => Ok(Self::Arrive),
            (2, Some(table)) => Ok(Self::Sit { table }),
            (2, None) => Err(ActionError::MissingTable),
            (3, _) => Ok(Self::Queue),
            (4, _) => Ok(Self::Leave),
            (code, _) => Err(ActionError::Unknown(code)),
        }
    }

    /// The requested table, for `Sit`.
    #[must_use]
    pub const fn table(self) -> Option<i64> {
        match self {
            Self::Sit { table } => Some(table),
            _ => None,
        }
    }
}

/// Error building an [`EventAction`] from a log id.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("unknown action id: {0}")]
    Unknown(u8),

    #[error("sit action requires a table number")]
    MissingTable,
}

/// One record of the club log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Wall-clock time of the event.
    pub time: NaiveTime,
    /// Who acted.
    pub client: ClientId,
    /// What they did.
    pub action: EventAction,
}

impl Event {
    pub const fn new(time: NaiveTime, client: ClientId, action: EventAction) -> Self {
        Self {
            time,
            client,
            action,
        }
    }
}

/// Renders the event the way it appears in the log: `HH:MM <id> <client> [table]`.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.time.format("%H:%M"),
            self.action.code(),
            self.client
        )?;
        if let Some(table) = self.action.table() {
            write!(f, " {table}")?;
        }
        Ok(())
    }
}
