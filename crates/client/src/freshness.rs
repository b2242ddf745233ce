//! Per-resource request tokens.
//!
//! Two actions in flight may both re-fetch the same collection. Each re-fetch
//! takes a ticket before its request is issued; its response may only be
//! committed if no later ticket for that resource has committed already.
//! The check and the state write happen under the resource's lock, so two
//! commits for the same resource never interleave.

use std::sync::{Mutex, PoisonError};

use cartsync_core::Resource;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ticket {
    resource: Resource,
    seq: u64,
}

impl Ticket {
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    issued: u64,
    committed: u64,
}

#[derive(Debug, Default)]
pub struct Freshness {
    inventory: Mutex<Counters>,
    cart: Mutex<Counters>,
}

impl Freshness {
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self, resource: Resource) -> &Mutex<Counters> {
        match resource {
            Resource::Inventory => &self.inventory,
            Resource::Cart => &self.cart,
        }
    }

    pub fn issue(&self, resource: Resource) -> Ticket {
        let mut counters = self
            .counters(resource)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        counters.issued += 1;
        Ticket {
            resource,
            seq: counters.issued,
        }
    }

    /// Run `apply` if the ticket is still fresh. Returns `false` for a stale
    /// ticket, in which case `apply` is not called.
    ///
    /// The resource lock is held while `apply` runs.
    pub fn commit_with(&self, ticket: Ticket, apply: impl FnOnce()) -> bool {
        let mut counters = self
            .counters(ticket.resource)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if ticket.seq <= counters.committed {
            return false;
        }
        counters.committed = ticket.seq;
        apply();
        true
    }
}
