//! The club state machine.
//!
//! [`Club`] owns the configuration and every registry for one working day.
//! Events are applied one at a time with [`Club::apply`]; once the log is
//! exhausted [`Club::close`] sends the remaining clients away and produces the
//! per-table report.
//!
//! # Rules
//!
//! - Events outside `[opens_at, closes_at]` are rejected with `NotOpenYet`.
//! - A client may change tables by sitting down again; the old table is
//!   settled at the moment of the move.
//! - Waiting is only allowed while every table is taken, and the queue never
//!   grows past the number of tables. The request that would overflow it sends
//!   the client away.
//! - When a seated client leaves, the head of the queue takes the table at the
//!   same instant.
//! - At closing time nobody is promoted: everybody still inside leaves, in
//!   name order.

use chrono::NaiveTime;

use crate::client::{ClientCondition, ClientRegistry};
use crate::config::ClubConfig;
use crate::error::ClubError;
use crate::event::{Event, EventAction};
use crate::ledger::BillingLedger;
use crate::outcome::{ClosingReport, Decision, Notice, Rejection};
use crate::queue::WaitQueue;
use crate::tables::TableRegistry;
use crate::types::{ClientId, TableNumber};

/// State of the club during one working day.
#[derive(Debug)]
pub struct Club {
    config: ClubConfig,
    clients: ClientRegistry,
    tables: TableRegistry,
    queue: WaitQueue,
    ledger: BillingLedger,
    last_event_at: Option<NaiveTime>,
}

impl Club {
    pub fn new(config: ClubConfig) -> Self {
        let tables = config.tables();
        Self {
            clients: ClientRegistry::new(),
            tables: TableRegistry::new(tables),
            queue: WaitQueue::new(tables),
            ledger: BillingLedger::new(tables, config.hourly_price()),
            config,
            last_event_at: None,
        }
    }

    pub const fn config(&self) -> &ClubConfig {
        &self.config
    }

    pub fn condition(&self, client: &ClientId) -> ClientCondition {
        self.clients.condition(client)
    }

    pub const fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    pub const fn queue(&self) -> &WaitQueue {
        &self.queue
    }

    pub const fn ledger(&self) -> &BillingLedger {
        &self.ledger
    }

    /// Applies one event.
    ///
    /// Broken business rules come back as [`Decision::Rejected`] and leave the
    /// state untouched. `Err` means the run cannot continue: events out of
    /// chronological order or a corrupted ledger.
    pub fn apply(&mut self, event: &Event) -> Result<Decision, ClubError> {
        if let Some(previous) = self.last_event_at.filter(|previous| event.time < *previous) {
            return Err(ClubError::OutOfOrder {
                time: event.time,
                previous,
            });
        }
        self.last_event_at = Some(event.time);

        let decision = if self.config.is_open(event.time) {
            match event.action {
                EventAction::Arrive => self.arrive(event),
                EventAction::Sit { table } => self.sit(event, table)?,
                EventAction::Queue => self.enqueue(event)?,
                EventAction::Leave => self.leave(event)?,
            }
        } else {
            Decision::Rejected(Rejection::NotOpenYet)
        };

        match &decision {
            Decision::Accepted(notices) => {
                tracing::debug!(%event, notices = notices.len(), "event applied");
            }
            Decision::Rejected(rejection) => {
                tracing::warn!(%event, %rejection, "event rejected");
            }
        }
        Ok(decision)
    }

    /// Sends everybody still inside away at closing time and reports per-table totals.
    pub fn close(mut self) -> Result<ClosingReport, ClubError> {
        let closes_at = self.config.closes_at();
        let remaining = self.clients.inside();
        tracing::info!(remaining = remaining.len(), "closing the club");

        let mut departures = Vec::with_capacity(remaining.len());
        for client in remaining {
            if let Some(table) = self.clients.condition(&client).table() {
                self.release(table, closes_at)?;
            }
            self.clients.set(&client, ClientCondition::Gone);
            departures.push(Notice::Left {
                time: closes_at,
                client,
            });
        }
        self.queue.clear();

        let report = ClosingReport {
            departures,
            tables: self.ledger.summaries(),
        };
        tracing::info!(revenue = ?report.total_revenue(), "day closed");
        Ok(report)
    }

    fn arrive(&mut self, event: &Event) -> Decision {
        if self.clients.condition(&event.client).is_inside() {
            return Decision::Rejected(Rejection::YouShallNotPass);
        }
        self.clients.set(&event.client, ClientCondition::Present);
        Decision::Accepted(Vec::new())
    }

    fn sit(&mut self, event: &Event, requested: i64) -> Result<Decision, ClubError> {
        let table = usize::try_from(requested)
            .ok()
            .filter(|table| self.config.has_table(*table));
        if table.is_some_and(|table| self.tables.is_occupied(table)) {
            return Ok(Decision::Rejected(Rejection::PlaceIsBusy));
        }

        let condition = self.clients.condition(&event.client);
        if !condition.is_inside() {
            return Ok(Decision::Rejected(Rejection::ClientUnknown));
        }
        let Some(table) = table else {
            return Ok(Decision::Rejected(Rejection::IncorrectTable));
        };

        match condition {
            ClientCondition::SeatedAt(old) => {
                self.release(old, event.time)?;
            }
            ClientCondition::Queued => {
                self.queue.remove(&event.client);
            }
            _ => {}
        }
        self.seat(&event.client, table, event.time)?;
        Ok(Decision::Accepted(Vec::new()))
    }

    fn enqueue(&mut self, event: &Event) -> Result<Decision, ClubError> {
        if self.tables.has_free() {
            return Ok(Decision::Rejected(Rejection::ICanWaitNoLonger));
        }

        if self.queue.is_full() {
            tracing::warn!(client = %event.client, "queue is full, sending client away");
            let mut notices = vec![Notice::Left {
                time: event.time,
                client: event.client.clone(),
            }];
            notices.extend(self.depart(&event.client, event.time)?);
            return Ok(Decision::Accepted(notices));
        }

        match self.clients.condition(&event.client) {
            ClientCondition::NotPresent | ClientCondition::Gone => {
                Ok(Decision::Rejected(Rejection::ClientUnknown))
            }
            ClientCondition::SeatedAt(_) => Ok(Decision::Rejected(Rejection::AlreadySeated)),
            ClientCondition::Queued => Ok(Decision::Rejected(Rejection::AlreadyQueued)),
            ClientCondition::Present => {
                if !self.queue.push(event.client.clone()) {
                    return Err(ClubError::QueueRejected {
                        client: event.client.clone(),
                    });
                }
                self.clients.set(&event.client, ClientCondition::Queued);
                Ok(Decision::Accepted(Vec::new()))
            }
        }
    }

    fn leave(&mut self, event: &Event) -> Result<Decision, ClubError> {
        if !self.clients.condition(&event.client).is_inside() {
            return Ok(Decision::Rejected(Rejection::ClientUnknown));
        }
        let promoted = self.depart(&event.client, event.time)?;
        Ok(Decision::Accepted(promoted.into_iter().collect()))
    }

    /// Removes `client` from the club at `time`.
    ///
    /// A freed table goes to the head of the queue immediately; the returned
    /// notice reports that promotion.
    fn depart(
        &mut self,
        client: &ClientId,
        time: NaiveTime,
    ) -> Result<Option<Notice>, ClubError> {
        let condition = self.clients.condition(client);
        self.clients.set(client, ClientCondition::Gone);

        match condition {
            ClientCondition::SeatedAt(table) => {
                self.release(table, time)?;
                let Some(next) = self.queue.pop() else {
                    return Ok(None);
                };
                self.seat(&next, table, time)?;
                tracing::info!(client = %next, table, "queued client took a freed table");
                Ok(Some(Notice::Seated {
                    time,
                    client: next,
                    table,
                }))
            }
            ClientCondition::Queued => {
                self.queue.remove(client);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn seat(
        &mut self,
        client: &ClientId,
        table: TableNumber,
        time: NaiveTime,
    ) -> Result<(), ClubError> {
        self.tables.occupy(table, client.clone())?;
        self.ledger.start(table, time)?;
        self.clients.set(client, ClientCondition::SeatedAt(table));
        Ok(())
    }

    fn release(&mut self, table: TableNumber, time: NaiveTime) -> Result<u64, ClubError> {
        let billed = self.ledger.settle(table, time)?;
        self.tables.release(table)?;
        Ok(billed)
    }
}
