//! Ticket registry
//!
//! Owns every outstanding ticket. A ticket is removed from the map by the
//! same operation that looks it up, so two racing redeem calls for one
//! identifier can never both observe the binding.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mockcas_types::{Ticket, TicketId};

use crate::{ProtocolError, ProtocolResult};

/// Concurrent map from ticket identifier to its (service, identity) binding.
///
/// Cloning is cheap and every clone shares the same map. Entries are only
/// ever removed by [`TicketRegistry::redeem`]; there is no expiry.
#[derive(Clone, Default)]
pub struct TicketRegistry {
    tickets: Arc<DashMap<TicketId, Ticket>>,
}

impl TicketRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a ticket bound to `service` and `identity`
    pub fn issue(&self, service: impl Into<String>, identity: impl Into<String>) -> TicketId {
        let ticket = Ticket::new(service, identity);
        loop {
            let id = TicketId::generate();
            // uuid v4 collisions are not expected; never overwrite a live binding
            if let Entry::Vacant(slot) = self.tickets.entry(id.clone()) {
                tracing::debug!(
                    ticket = id.redacted(),
                    identity = %ticket.identity,
                    "Ticket issued"
                );
                slot.insert(ticket);
                return id;
            }
        }
    }

    /// Redeem a ticket for the identity it names.
    ///
    /// The ticket is consumed whether or not the service matches.
    pub fn redeem(&self, ticket: Option<&str>, service: Option<&str>) -> ProtocolResult<String> {
        let (ticket, service) = match (non_empty(ticket), non_empty(service)) {
            (Some(t), Some(s)) => (t, s),
            _ => return Err(ProtocolError::MissingParameters),
        };

        let Some((id, binding)) = self.tickets.remove(ticket) else {
            tracing::debug!("Ticket not found");
            return Err(ProtocolError::TicketNotFound);
        };

        if binding.service != service {
            tracing::debug!(
                ticket = id.redacted(),
                expected = %binding.service,
                actual = %service,
                "Ticket service mismatch"
            );
            return Err(ProtocolError::ServiceMismatch);
        }

        tracing::debug!(ticket = id.redacted(), identity = %binding.identity, "Ticket redeemed");
        Ok(binding.identity)
    }

    /// Number of outstanding tickets
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Whether no tickets are outstanding
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

impl std::fmt::Debug for TicketRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketRegistry")
            .field("outstanding", &self.tickets.len())
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
