//! What the club says back: decisions, notices and the closing report.

use std::fmt;

use chrono::{NaiveTime, TimeDelta};

use crate::types::{ClientId, TableNumber};

/// A business rule the event broke. The event is ignored and the run goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Event outside working hours.
    NotOpenYet,
    /// Arriving client is already inside.
    YouShallNotPass,
    /// Requested table is taken.
    PlaceIsBusy,
    /// Client is not inside the club.
    ClientUnknown,
    /// Client asked to wait while a table is free.
    ICanWaitNoLonger,
    /// Requested table does not exist.
    IncorrectTable,
    /// Client holding a table asked to wait.
    AlreadySeated,
    /// Client already waiting asked to wait again.
    AlreadyQueued,
}

impl Rejection {
    /// Tag printed in the event log.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::NotOpenYet => "NotOpenYet",
            Self::YouShallNotPass => "YouShallNotPass",
            Self::PlaceIsBusy => "PlaceIsBusy",
            Self::ClientUnknown => "ClientUnknown",
            Self::ICanWaitNoLonger => "ICanWaitNoLonger!",
            Self::IncorrectTable => "Error: incorrect table",
            Self::AlreadySeated => "Error: already seated",
            Self::AlreadyQueued => "Error: already queued",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Something the club did on its own initiative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Client was sent away: queue overflow or closing time.
    Left { time: NaiveTime, client: ClientId },
    /// Client from the head of the queue took a freed table.
    Seated {
        time: NaiveTime,
        client: ClientId,
        table: TableNumber,
    },
}

impl Notice {
    /// Outgoing event id used by the log format.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Left { .. } => 11,
            Self::Seated { .. } => 12,
        }
    }

    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        match self {
            Self::Left { time, .. } | Self::Seated { time, .. } => *time,
        }
    }

    #[must_use]
    pub const fn client(&self) -> &ClientId {
        match self {
            Self::Left { client, .. } | Self::Seated { client, .. } => client,
        }
    }
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// State changed; carries any notices the change triggered.
    Accepted(Vec<Notice>),
    /// A business rule was broken; state is untouched.
    Rejected(Rejection),
}

impl Decision {
    /// Notices triggered by the event; empty for rejections.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        match self {
            Self::Accepted(notices) => notices,
            Self::Rejected(_) => &[],
        }
    }
}

/// End-of-day totals for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub table: TableNumber,
    pub revenue: u64,
    pub occupied: TimeDelta,
}

/// Output of the closing sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingReport {
    /// Forced departures at closing time, ordered by client name.
    pub departures: Vec<Notice>,
    /// One entry per table, ascending.
    pub tables: Vec<TableSummary>,
}

impl ClosingReport {
    /// Revenue of the whole day; `None` if it does not fit in a `u64`.
    #[must_use]
    pub fn total_revenue(&self) -> Option<u64> {
        self.tables
            .iter()
            .try_fold(0u64, |total, summary| total.checked_add(summary.revenue))
    }

    #[must_use]
    pub fn total_occupied(&self) -> TimeDelta {
        self.tables
            .iter()
            .fold(TimeDelta::zero(), |total, summary| total + summary.occupied)
    }
}
