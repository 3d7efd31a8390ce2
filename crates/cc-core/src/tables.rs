//! Table occupancy.

use crate::error::ClubError;
use crate::types::{ClientId, TableNumber};

/// Who holds each table.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    /// Slot `i` is table `i + 1`.
    owners: Vec<Option<ClientId>>,
}

impl TableRegistry {
    pub fn new(tables: usize) -> Self {
        Self {
            owners: vec![None; tables],
        }
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Client holding `table`; `None` for free or nonexistent tables.
    pub fn owner(&self, table: TableNumber) -> Option<&ClientId> {
        self.slot(table).ok().and_then(Option::as_ref)
    }

    pub fn is_occupied(&self, table: TableNumber) -> bool {
        self.owner(table).is_some()
    }

    pub fn occupied(&self) -> usize {
        self.owners.iter().filter(|owner| owner.is_some()).count()
    }

    /// Whether at least one table is free.
    pub fn has_free(&self) -> bool {
        self.owners.iter().any(Option::is_none)
    }

    pub fn occupy(&mut self, table: TableNumber, client: ClientId) -> Result<(), ClubError> {
        let slot = self.slot_mut(table)?;
        if let Some(owner) = slot {
            return Err(ClubError::TableTaken {
                table,
                owner: owner.clone(),
            });
        }
        *slot = Some(client);
        Ok(())
    }

    /// Frees `table`, returning the client who held it.
    pub fn release(&mut self, table: TableNumber) -> Result<ClientId, ClubError> {
        self.slot_mut(table)?
            .take()
            .ok_or(ClubError::NotOccupied { table })
    }

    fn slot(&self, table: TableNumber) -> Result<&Option<ClientId>, ClubError> {
        let tables = self.owners.len();
        table
            .checked_sub(1)
            .and_then(|index| self.owners.get(index))
            .ok_or(ClubError::NoSuchTable { table, tables })
    }

    fn slot_mut(&mut self, table: TableNumber) -> Result<&mut Option<ClientId>, ClubError> {
        let tables = self.owners.len();
        table
            .checked_sub(1)
            .and_then(|index| self.owners.get_mut(index))
            .ok_or(ClubError::NoSuchTable { table, tables })
    }
}
