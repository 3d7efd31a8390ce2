//! Club configuration.

use chrono::{NaiveTime, TimeDelta};

use crate::error::ConfigError;
use crate::types::TableNumber;

/// Largest table count a club may be configured with.
pub const MAX_TABLES: usize = 100_000;

/// Immutable parameters of one working day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubConfig {
    tables: usize,
    opens_at: NaiveTime,
    closes_at: NaiveTime,
    hourly_price: u64,
}

impl ClubConfig {
    /// Creates a configuration after validation.
    pub fn new(
        tables: usize,
        opens_at: NaiveTime,
        closes_at: NaiveTime,
        hourly_price: u64,
    ) -> Result<Self, ConfigError> {
        if tables == 0 {
            return Err(ConfigError::NoTables);
        }
        if tables > MAX_TABLES {
            return Err(ConfigError::TooManyTables {
                tables,
                max: MAX_TABLES,
            });
        }
        if opens_at >= closes_at {
            return Err(ConfigError::InvalidHours {
                opens_at,
                closes_at,
            });
        }
        Ok(Self {
            tables,
            opens_at,
            closes_at,
            hourly_price,
        })
    }

    /// Number of tables, numbered `1..=tables`.
    #[must_use]
    pub const fn tables(&self) -> usize {
        self.tables
    }

    #[must_use]
    pub const fn opens_at(&self) -> NaiveTime {
        self.opens_at
    }

    #[must_use]
    pub const fn closes_at(&self) -> NaiveTime {
        self.closes_at
    }

    /// Price of one started hour at a table.
    #[must_use]
    pub const fn hourly_price(&self) -> u64 {
        self.hourly_price
    }

    /// Whether the club accepts events at `time`. Both ends are inclusive.
    #[must_use]
    pub fn is_open(&self, time: NaiveTime) -> bool {
        (self.opens_at..=self.closes_at).contains(&time)
    }

    /// Whether `table` names one of the club's tables.
    #[must_use]
    pub const fn has_table(&self, table: TableNumber) -> bool {
        table >= 1 && table <= self.tables
    }

    /// Length of the working day.
    #[must_use]
    pub fn business_hours(&self) -> TimeDelta {
        self.closes_at.signed_duration_since(self.opens_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn rejects_zero_tables() {
        assert_eq!(
            ClubConfig::new(0, time(9, 0), time(19, 0), 10),
            Err(ConfigError::NoTables)
        );
    }

    #[test]
    fn table_count_is_bounded() {
        assert!(ClubConfig::new(MAX_TABLES, time(9, 0), time(19, 0), 10).is_ok());
        assert_eq!(
            ClubConfig::new(MAX_TABLES + 1, time(9, 0), time(19, 0), 10),
            Err(ConfigError::TooManyTables {
                tables: MAX_TABLES + 1,
                max: MAX_TABLES,
            })
        );
    }

    #[test]
    fn rejects_inverted_or_empty_hours() {
        assert!(matches!(
            ClubConfig::new(1, time(19, 0), time(9, 0), 10),
            Err(ConfigError::InvalidHours { .. })
        ));
        assert!(matches!(
            ClubConfig::new(1, time(9, 0), time(9, 0), 10),
            Err(ConfigError::InvalidHours { .. })
        ));
    }

    #[test]
    fn free_club_is_allowed() {
        let config = ClubConfig::new(2, time(9, 0), time(19, 0), 0).unwrap();
        assert_eq!(config.hourly_price(), 0);
    }

    #[test]
    fn open_interval_is_closed_on_both_ends() {
        let config = ClubConfig::new(1, time(9, 0), time(19, 0), 10).unwrap();
        assert!(!config.is_open(time(8, 59)));
        assert!(config.is_open(time(9, 0)));
        assert!(config.is_open(time(12, 30)));
        assert!(config.is_open(time(19, 0)));
        assert!(!config.is_open(time(19, 1)));
    }

    #[test]
    fn table_range_is_one_based() {
        let config = ClubConfig::new(3, time(9, 0), time(19, 0), 10).unwrap();
        assert!(!config.has_table(0));
        assert!(config.has_table(1));
        assert!(config.has_table(3));
        assert!(!config.has_table(4));
    }

    #[test]
    fn business_hours_spans_the_day() {
        let config = ClubConfig::new(1, time(9, 0), time(19, 30), 10).unwrap();
        assert_eq!(config.business_hours(), TimeDelta::minutes(630));
    }
}
