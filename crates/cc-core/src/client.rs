//! Client registry.

use std::collections::HashMap;

use crate::types::{ClientId, TableNumber};

/// A client's participation in the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientCondition {
    /// Never arrived.
    #[default]
    NotPresent,
    /// Inside, without a table and not queued.
    Present,
    /// Holding a table.
    SeatedAt(TableNumber),
    /// Waiting for a table.
    Queued,
    /// Left or was sent away. May arrive again.
    Gone,
}

impl ClientCondition {
    /// Whether the client is currently inside the club.
    #[must_use]
    pub const fn is_inside(self) -> bool {
        matches!(self, Self::Present | Self::SeatedAt(_) | Self::Queued)
    }

    /// The table held, if any.
    #[must_use]
    pub const fn table(self) -> Option<TableNumber> {
        match self {
            Self::SeatedAt(table) => Some(table),
            _ => None,
        }
    }
}

/// Condition of every client seen during the run.
///
/// Records are never dropped; a client who left keeps a `Gone` entry.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    conditions: HashMap<ClientId, ClientCondition>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current condition; unknown clients are `NotPresent`.
    pub fn condition(&self, client: &ClientId) -> ClientCondition {
        self.conditions.get(client).copied().unwrap_or_default()
    }

    pub fn set(&mut self, client: &ClientId, condition: ClientCondition) {
        if let Some(current) = self.conditions.get_mut(client) {
            *current = condition;
        } else {
            self.conditions.insert(client.clone(), condition);
        }
    }

    /// Clients still inside, sorted by name.
    pub fn inside(&self) -> Vec<ClientId> {
        let mut clients: Vec<ClientId> = self
            .conditions
            .iter()
            .filter(|(_, condition)| condition.is_inside())
            .map(|(client, _)| client.clone())
            .collect();
        clients.sort();
        clients
    }

    /// Number of clients ever seen.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
