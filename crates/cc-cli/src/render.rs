//! Text rendering of the event log and the end-of-day report.

use chrono::{NaiveTime, TimeDelta};

use cc_core::{Notice, Rejection, TableSummary};

/// Outgoing event id for rejected events.
const REJECTION_CODE: u8 = 13;

/// Formats a wall-clock time as `HH:MM`.
pub fn clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Formats a duration as `HH:MM`. Hours are not capped at 24.
/// Negative durations are treated as zero.
pub fn duration(duration: TimeDelta) -> String {
    let minutes = duration.num_minutes().max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// `HH:MM 11 <client>` or `HH:MM 12 <client> <table>`.
pub fn notice(notice: &Notice) -> String {
    match notice {
        Notice::Left { time, client } => format!("{} {} {client}", clock(*time), notice.code()),
        Notice::Seated {
            time,
            client,
            table,
        } => format!("{} {} {client} {table}", clock(*time), notice.code()),
    }
}

/// `HH:MM 13 <tag>`.
pub fn rejection(time: NaiveTime, rejection: Rejection) -> String {
    format!("{} {REJECTION_CODE} {rejection}", clock(time))
}

/// `<table> <revenue> <HH:MM>`.
pub fn summary(summary: &TableSummary) -> String {
    format!(
        "{} {} {}",
        summary.table,
        summary.revenue,
        duration(summary.occupied)
    )
}
