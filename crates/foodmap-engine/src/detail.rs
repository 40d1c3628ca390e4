//! Generation stamps for marker-click detail fetches.
//!
//! Each click issues a ticket; a response is only merged when it carries
//! the latest ticket issued for its store, so a slow earlier response can't
//! overwrite a newer one.

use std::collections::HashMap;

use foodmap_core::StoreId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    store_id: StoreId,
    generation: u64,
}

impl DetailTicket {
    #[must_use]
    pub fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct DetailRequests {
    next_generation: u64,
    latest: HashMap<StoreId, u64>,
}

impl DetailRequests {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket that supersedes any outstanding one for `store_id`.
    pub fn begin(&mut self, store_id: &StoreId) -> DetailTicket {
        self.next_generation += 1;
        self.latest.insert(store_id.clone(), self.next_generation);
        DetailTicket {
            store_id: store_id.clone(),
            generation: self.next_generation,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &DetailTicket) -> bool {
        self.latest.get(&ticket.store_id) == Some(&ticket.generation)
    }

    /// Retires `ticket`. Returns `true` if its response should be merged.
    pub fn finish(&mut self, ticket: &DetailTicket) -> bool {
        if self.is_current(ticket) {
            self.latest.remove(&ticket.store_id);
            true
        } else {
            false
        }
    }

    /// Drops the outstanding request for `store_id`, if any.
    pub fn cancel(&mut self, store_id: &StoreId) -> bool {
        self.latest.remove(store_id).is_some()
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.latest.len()
    }
}
