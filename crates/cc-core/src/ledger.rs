//! Per-table billing.
//!
//! Every started hour at a table is billed in full: an occupancy of 61 minutes
//! costs two hours. Occupied time is accumulated unrounded.

use chrono::{NaiveTime, TimeDelta};

use crate::error::ClubError;
use crate::outcome::TableSummary;
use crate::types::TableNumber;

const SECONDS_PER_HOUR: u64 = 3600;

/// Accumulated billing for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLedgerEntry {
    revenue: u64,
    occupied: TimeDelta,
    started_at: Option<NaiveTime>,
}

impl TableLedgerEntry {
    fn new() -> Self {
        Self {
            revenue: 0,
            occupied: TimeDelta::zero(),
            started_at: None,
        }
    }

    #[must_use]
    pub const fn revenue(&self) -> u64 {
        self.revenue
    }

    /// Total time the table was held, unrounded.
    #[must_use]
    pub const fn occupied(&self) -> TimeDelta {
        self.occupied
    }

    /// Start of the open occupancy, if the table is currently held.
    #[must_use]
    pub const fn started_at(&self) -> Option<NaiveTime> {
        self.started_at
    }
}

/// Number of billable hours for an occupancy, rounding partial hours up.
///
/// Returns `None` for negative durations.
pub fn billable_hours(elapsed: TimeDelta) -> Option<u64> {
    let seconds = u64::try_from(elapsed.num_seconds()).ok()?;
    Some(seconds.div_ceil(SECONDS_PER_HOUR))
}

/// Revenue and occupied time for every table of the club.
#[derive(Debug, Clone)]
pub struct BillingLedger {
    /// Slot `i` is table `i + 1`.
    entries: Vec<TableLedgerEntry>,
    hourly_price: u64,
}

impl BillingLedger {
    pub fn new(tables: usize, hourly_price: u64) -> Self {
        Self {
            entries: vec![TableLedgerEntry::new(); tables],
            hourly_price,
        }
    }

    pub fn entry(&self, table: TableNumber) -> Result<&TableLedgerEntry, ClubError> {
        let tables = self.entries.len();
        table
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .ok_or(ClubError::NoSuchTable { table, tables })
    }

    /// Opens an occupancy of `table` at `time`.
    pub fn start(&mut self, table: TableNumber, time: NaiveTime) -> Result<(), ClubError> {
        let entry = self.entry_mut(table)?;
        if let Some(started_at) = entry.started_at {
            return Err(ClubError::AlreadyStarted { table, started_at });
        }
        entry.started_at = Some(time);
        Ok(())
    }

    /// Closes the open occupancy of `table` at `time` and returns the amount billed.
    pub fn settle(&mut self, table: TableNumber, time: NaiveTime) -> Result<u64, ClubError> {
        let hourly_price = self.hourly_price;
        let entry = self.entry_mut(table)?;
        let started_at = entry.started_at.ok_or(ClubError::NotOccupied { table })?;

        let elapsed = time.signed_duration_since(started_at);
        let hours = billable_hours(elapsed).ok_or(ClubError::NegativeElapsed {
            table,
            started_at,
            time,
        })?;
        let billed = hours
            .checked_mul(hourly_price)
            .ok_or(ClubError::RevenueOverflow { table })?;

        entry.revenue = entry
            .revenue
            .checked_add(billed)
            .ok_or(ClubError::RevenueOverflow { table })?;
        entry.occupied += elapsed;
        entry.started_at = None;

        tracing::debug!(table, %started_at, %time, billed, "settled table");
        Ok(billed)
    }

    /// Per-table totals in ascending table order.
    pub fn summaries(&self) -> Vec<TableSummary> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| TableSummary {
                table: index + 1,
                revenue: entry.revenue,
                occupied: entry.occupied,
            })
            .collect()
    }

    /// Total revenue across all tables; `None` on overflow.
    pub fn total_revenue(&self) -> Option<u64> {
        self.entries
            .iter()
            .try_fold(0u64, |total, entry| total.checked_add(entry.revenue))
    }

    fn entry_mut(&mut self, table: TableNumber) -> Result<&mut TableLedgerEntry, ClubError> {
        let tables = self.entries.len();
        table
            .checked_sub(1)
            .and_then(|index| self.entries.get_mut(index))
            .ok_or(ClubError::NoSuchTable { table, tables })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn bill(minutes: u32, price: u64) -> u64 {
        let mut ledger = BillingLedger::new(1, price);
        ledger.start(1, time(10, 0)).unwrap();
        let end = time(10, 0) + TimeDelta::minutes(i64::from(minutes));
        ledger.settle(1, end).unwrap()
    }

    #[test]
    fn partial_hours_round_up() {
        assert_eq!(bill(1, 10), 10);
        assert_eq!(bill(59, 10), 10);
        assert_eq!(bill(60, 10), 10);
        assert_eq!(bill(61, 10), 20);
        assert_eq!(bill(180, 7), 21);
    }

    #[test]
    fn zero_elapsed_bills_nothing() {
        let mut ledger = BillingLedger::new(1, 10);
        ledger.start(1, time(12, 0)).unwrap();
        assert_eq!(ledger.settle(1, time(12, 0)).unwrap(), 0);

        let entry = ledger.entry(1).unwrap();
        assert_eq!(entry.revenue(), 0);
        assert_eq!(entry.occupied(), TimeDelta::zero());
        assert_eq!(entry.started_at(), None);
    }

    #[test]
    fn occupied_time_is_unrounded_and_accumulates() {
        let mut ledger = BillingLedger::new(2, 10);
        ledger.start(2, time(9, 15)).unwrap();
        ledger.settle(2, time(10, 10)).unwrap();
        ledger.start(2, time(11, 0)).unwrap();
        ledger.settle(2, time(11, 30)).unwrap();

        let entry = ledger.entry(2).unwrap();
        assert_eq!(entry.revenue(), 20);
        assert_eq!(entry.occupied(), TimeDelta::minutes(85));
        assert_eq!(ledger.total_revenue(), Some(20));
    }

    #[test]
    fn total_revenue_overflow_is_none() {
        let price = u64::MAX / 2 + 1;
        let mut ledger = BillingLedger::new(2, price);
        for table in [1, 2] {
            ledger.start(table, time(9, 0)).unwrap();
            ledger.settle(table, time(9, 30)).unwrap();
        }

        assert_eq!(ledger.entry(1).unwrap().revenue(), price);
        assert_eq!(ledger.entry(2).unwrap().revenue(), price);
        assert_eq!(ledger.total_revenue(), None);
    }

    #[test]
    fn negative_elapsed_is_fatal() {
        let mut ledger = BillingLedger::new(1, 10);
        ledger.start(1, time(12, 0)).unwrap();
        assert_eq!(
            ledger.settle(1, time(11, 0)),
            Err(ClubError::NegativeElapsed {
                table: 1,
                started_at: time(12, 0),
                time: time(11, 0),
            })
        );
    }

    #[test]
    fn settle_without_start_is_fatal() {
        let mut ledger = BillingLedger::new(1, 10);
        assert_eq!(
            ledger.settle(1, time(12, 0)),
            Err(ClubError::NotOccupied { table: 1 })
        );
    }

    #[test]
    fn double_start_is_fatal() {
        let mut ledger = BillingLedger::new(1, 10);
        ledger.start(1, time(12, 0)).unwrap();
        assert!(matches!(
            ledger.start(1, time(12, 5)),
            Err(ClubError::AlreadyStarted { table: 1, .. })
        ));
    }

    #[test]
    fn unknown_table_is_fatal() {
        let mut ledger = BillingLedger::new(2, 10);
        assert_eq!(
            ledger.start(3, time(12, 0)),
            Err(ClubError::NoSuchTable {
                table: 3,
                tables: 2
            })
        );
        assert!(ledger.entry(0).is_err());
    }

    #[test]
    fn revenue_overflow_is_fatal() {
        let mut ledger = BillingLedger::new(1, u64::MAX);
        ledger.start(1, time(9, 0)).unwrap();
        assert_eq!(
            ledger.settle(1, time(11, 0)),
            Err(ClubError::RevenueOverflow { table: 1 })
        );
    }

    #[test]
    fn summaries_cover_every_table() {
        let mut ledger = BillingLedger::new(3, 5);
        ledger.start(2, time(9, 0)).unwrap();
        ledger.settle(2, time(9, 45)).unwrap();

        let summaries = ledger.summaries();
        let tables: Vec<usize> = summaries.iter().map(|s| s.table).collect();
        assert_eq!(tables, [1, 2, 3]);
        assert_eq!(summaries[1].revenue, 5);
        assert_eq!(summaries[1].occupied, TimeDelta::minutes(45));
        assert_eq!(summaries[0].revenue, 0);
    }
}
