//! Club log parsing.
//!
//! The log starts with a three-line header followed by one event per line:
//!
//! ```text
//! 3
//! 09:00 19:00
//! 10
//! 08:48 1 client1
//! 09:54 2 client1 1
//! ```
//!
//! Any malformed line aborts parsing; the error keeps the line so the caller can
//! print it.

use chrono::NaiveTime;
use thiserror::Error;

use cc_core::{
    ActionError, ClientId, ClubConfig, ConfigError, Event, EventAction, ValidationError,
};

/// Number of lines taken by the header.
const HEADER_LINES: usize = 3;

/// A parsed club log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubLog {
    pub config: ClubConfig,
    pub records: Vec<Record>,
}

/// One event line, with its position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number.
    pub line: usize,
    /// The line as written.
    pub raw: String,
    pub event: Event,
}

/// A malformed line. Fatal for the whole run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct InputError {
    /// 1-based line number.
    pub line: usize,
    /// The offending line as written (empty if the file ended early).
    pub raw: String,
    pub kind: InputErrorKind,
}

/// What is wrong with a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputErrorKind {
    #[error("log ends before the header is complete")]
    MissingHeader,

    #[error("empty event line")]
    EmptyLine,

    #[error("expected `<HH:MM> <action> <client> [table]`")]
    TooFewFields,

    #[error("expected `<HH:MM> <HH:MM>`")]
    BadHours,

    #[error("invalid time {0:?}, expected HH:MM")]
    BadTime(String),

    #[error("invalid number {0:?}")]
    BadNumber(String),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Client(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl InputError {
    fn new(line: usize, raw: &str, kind: impl Into<InputErrorKind>) -> Self {
        Self {
            line,
            raw: raw.to_string(),
            kind: kind.into(),
        }
    }
}

/// Parses a whole log.
pub fn parse(text: &str) -> Result<ClubLog, InputError> {
    let lines: Vec<&str> = text.lines().collect();
    let header_line = |index: usize| {
        lines
            .get(index)
            .copied()
            .ok_or_else(|| InputError::new(index + 1, "", InputErrorKind::MissingHeader))
    };

    let tables_raw = header_line(0)?;
    let tables: usize =
        parse_number(tables_raw).map_err(|kind| InputError::new(1, tables_raw, kind))?;

    let hours_raw = header_line(1)?;
    let (opens_at, closes_at) =
        parse_hours(hours_raw).map_err(|kind| InputError::new(2, hours_raw, kind))?;

    let price_raw = header_line(2)?;
    let hourly_price: u64 =
        parse_number(price_raw).map_err(|kind| InputError::new(3, price_raw, kind))?;

    let config = ClubConfig::new(tables, opens_at, closes_at, hourly_price).map_err(|err| {
        // point at the line holding the offending value
        match err {
            ConfigError::NoTables | ConfigError::TooManyTables { .. } => {
                InputError::new(1, tables_raw, err)
            }
            ConfigError::InvalidHours { .. } => InputError::new(2, hours_raw, err),
        }
    })?;

    let body = lines.get(HEADER_LINES..).unwrap_or_default();
    let last_content = body
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |index| index + 1);

    let records = body[..last_content]
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let line = HEADER_LINES + index + 1;
            parse_event(raw)
                .map(|event| Record {
                    line,
                    raw: (*raw).to_string(),
                    event,
                })
                .map_err(|kind| InputError::new(line, raw, kind))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        tables,
        %opens_at,
        %closes_at,
        hourly_price,
        events = records.len(),
        "parsed club log"
    );
    Ok(ClubLog { config, records })
}

/// Parses `<HH:MM> <action> <client> [table]`.
///
/// The table is read only for `Sit`; other actions ignore a trailing field.
pub fn parse_event(line: &str) -> Result<Event, InputErrorKind> {
    if line.trim().is_empty() {
        return Err(InputErrorKind::EmptyLine);
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [time, code, client, rest @ ..] = fields.as_slice() else {
        return Err(InputErrorKind::TooFewFields);
    };

    let time = parse_time(time)?;
    let code: u8 = parse_number(code)?;
    let table = match (code, rest.first()) {
        (2, Some(table)) => Some(parse_number::<i64>(table)?),
        _ => None,
    };
    let action = EventAction::from_code(code, table)?;
    let client = ClientId::new(*client)?;

    Ok(Event::new(time, client, action))
}

/// Parses a strict `HH:MM` wall-clock time.
pub fn parse_time(s: &str) -> Result<NaiveTime, InputErrorKind> {
    if s.len() != 5 {
        return Err(InputErrorKind::BadTime(s.to_string()));
    }
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| InputErrorKind::BadTime(s.to_string()))
}

fn parse_hours(line: &str) -> Result<(NaiveTime, NaiveTime), InputErrorKind> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [opens_at, closes_at] = fields.as_slice() else {
        return Err(InputErrorKind::BadHours);
    };
    Ok((parse_time(opens_at)?, parse_time(closes_at)?))
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, InputErrorKind> {
    s.trim()
        .parse()
        .map_err(|_| InputErrorKind::BadNumber(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    const HEADER: &str = "3\n09:00 19:00\n10\n";

    #[test]
    fn parses_header_and_events() {
        let log = parse(&format!("{HEADER}08:48 1 client1\n09:54 2 client1 1\n")).unwrap();

        assert_eq!(log.config.tables(), 3);
        assert_eq!(log.config.opens_at(), time(9, 0));
        assert_eq!(log.config.closes_at(), time(19, 0));
        assert_eq!(log.config.hourly_price(), 10);

        assert_eq!(log.records.len(), 2);
        assert_eq!(log.records[0].line, 4);
        assert_eq!(log.records[0].event.action, EventAction::Arrive);
        assert_eq!(log.records[1].line, 5);
        assert_eq!(log.records[1].raw, "09:54 2 client1 1");
        assert_eq!(log.records[1].event.action, EventAction::Sit { table: 1 });
    }

    #[test]
    fn header_only_log_has_no_records() {
        let log = parse(HEADER).unwrap();
        assert!(log.records.is_empty());
    }

    #[test]
    fn trailing_blank_lines_end_the_log() {
        let log = parse(&format!("{HEADER}09:00 1 amy\n\n\n")).unwrap();
        assert_eq!(log.records.len(), 1);
    }

    #[test]
    fn blank_line_between_events_is_malformed() {
        let err = parse(&format!("{HEADER}09:00 1 amy\n\n09:10 4 amy\n")).unwrap_err();
        assert_eq!(err.line, 5);
        assert_eq!(err.kind, InputErrorKind::EmptyLine);
    }

    #[test]
    fn short_header_is_malformed() {
        let err = parse("3\n09:00 19:00\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, InputErrorKind::MissingHeader);
    }

    #[test]
    fn header_errors_point_at_their_line() {
        let err = parse("three\n09:00 19:00\n10\n").unwrap_err();
        assert_eq!((err.line, err.raw.as_str()), (1, "three"));

        let err = parse("3\n09:00\n10\n").unwrap_err();
        assert_eq!((err.line, err.kind), (2, InputErrorKind::BadHours));

        let err = parse("3\n09:00 19:00\n-5\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, InputErrorKind::BadNumber("-5".to_string()));
    }

    #[test]
    fn invalid_configuration_points_at_its_line() {
        let err = parse("0\n09:00 19:00\n10\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, InputErrorKind::Config(ConfigError::NoTables));

        let err = parse("100000000000000\n09:00 19:00\n10\n09:00 1 a\n").unwrap_err();
        assert_eq!((err.line, err.raw.as_str()), (1, "100000000000000"));
        assert!(matches!(
            err.kind,
            InputErrorKind::Config(ConfigError::TooManyTables { .. })
        ));

        let err = parse("1\n19:00 09:00\n10\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.raw, "19:00 09:00");
    }

    #[test]
    fn event_errors_keep_the_raw_line() {
        let err = parse(&format!("{HEADER}09:00 1 amy\n9:5 1 bob\n")).unwrap_err();
        assert_eq!(err.line, 5);
        assert_eq!(err.raw, "9:5 1 bob");
        assert_eq!(err.to_string(), "line 5: invalid time \"9:5\", expected HH:MM");
    }

    #[test]
    fn malformed_events() {
        assert_eq!(parse_event("09:00 1"), Err(InputErrorKind::TooFewFields));
        assert_eq!(
            parse_event("09:00 x amy"),
            Err(InputErrorKind::BadNumber("x".to_string()))
        );
        assert_eq!(
            parse_event("09:00 5 amy"),
            Err(InputErrorKind::Action(ActionError::Unknown(5)))
        );
        assert_eq!(
            parse_event("09:00 2 amy"),
            Err(InputErrorKind::Action(ActionError::MissingTable))
        );
        assert_eq!(
            parse_event("09:00 2 amy one"),
            Err(InputErrorKind::BadNumber("one".to_string()))
        );
        assert_eq!(
            parse_event("25:00 1 amy"),
            Err(InputErrorKind::BadTime("25:00".to_string()))
        );
        assert!(matches!(
            parse_event("09:00 1 Amy"),
            Err(InputErrorKind::Client(_))
        ));
    }

    #[test]
    fn out_of_range_tables_are_left_to_the_club() {
        let event = parse_event("09:00 2 amy -3").unwrap();
        assert_eq!(event.action, EventAction::Sit { table: -3 });
    }

    #[test]
    fn table_on_other_actions_is_ignored() {
        let event = parse_event("09:00 4 amy 2").unwrap();
        assert_eq!(event.action, EventAction::Leave);
    }
}
