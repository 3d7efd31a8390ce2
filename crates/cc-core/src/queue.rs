//! Wait queue for clients with no free table.

use std::collections::VecDeque;

use crate::types::ClientId;

/// FIFO of waiting clients, bounded by the number of tables.
#[derive(Debug, Clone)]
pub struct WaitQueue {
    clients: VecDeque<ClientId>,
    capacity: usize,
}

impl WaitQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            clients: VecDeque::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Whether one more client would exceed the capacity.
    pub fn is_full(&self) -> bool {
        self.clients.len() >= self.capacity
    }

    pub fn contains(&self, client: &ClientId) -> bool {
        self.clients.contains(client)
    }

    /// Appends `client` to the tail. Returns `false` and leaves the queue
    /// unchanged when it is full or already holds the client.
    #[must_use]
    pub fn push(&mut self, client: ClientId) -> bool {
        if self.is_full() || self.contains(&client) {
            return false;
        }
        self.clients.push_back(client);
        true
    }

    /// Takes the longest-waiting client.
    pub fn pop(&mut self) -> Option<ClientId> {
        self.clients.pop_front()
    }

    /// Drops `client` from wherever it waits. Returns whether it was queued.
    pub fn remove(&mut self, client: &ClientId) -> bool {
        let Some(index) = self.clients.iter().position(|queued| queued == client) else {
            return false;
        };
        self.clients.remove(index);
        true
    }

    pub fn clear(&mut self) {
        self.clients.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientId> {
        self.clients.iter()
    }
}
