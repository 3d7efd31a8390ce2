//! One run: parse the log, apply every event, close the club.
//!
//! Output is collected in memory and only handed back once the whole day has
//! been replayed, so a fatal error never leaves a partial report behind.

use thiserror::Error;

use cc_core::{Club, ClubError, Decision};

use crate::input::{self, InputError};
use crate::render;

/// A fatal error that aborted the replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("line {line}: {source}")]
    Club {
        line: usize,
        raw: String,
        #[source]
        source: ClubError,
    },
}

impl ReplayError {
    /// The input line that caused the failure, as written.
    pub fn offending_line(&self) -> &str {
        match self {
            Self::Input(err) => &err.raw,
            Self::Club { raw, .. } => raw,
        }
    }
}

/// Replays a complete club log and returns the rendered output.
pub fn replay(text: &str) -> Result<String, ReplayError> {
    let log = input::parse(text)?;
    let config = log.config;
    tracing::info!(
        tables = config.tables(),
        events = log.records.len(),
        "replaying club log"
    );

    let mut lines = vec![render::clock(config.opens_at())];
    let mut club = Club::new(config.clone());

    for record in &log.records {
        let decision = club
            .apply(&record.event)
            .map_err(|source| ReplayError::Club {
                line: record.line,
                raw: record.raw.clone(),
                source,
            })?;

        lines.push(record.raw.clone());
        match decision {
            Decision::Accepted(notices) => lines.extend(notices.iter().map(render::notice)),
            Decision::Rejected(rejection) => {
                lines.push(render::rejection(record.event.time, rejection));
            }
        }
    }

    // no single line is to blame for a failure here; point at the end of the log
    let report = club.close().map_err(|source| ReplayError::Club {
        line: log.records.last().map_or(0, |record| record.line),
        raw: String::new(),
        source,
    })?;

    lines.extend(report.departures.iter().map(render::notice));
    lines.push(render::clock(config.closes_at()));
    lines.extend(report.tables.iter().map(render::summary));

    let mut output = lines.join("\n");
    output.push('\n');
    Ok(output)
}
