//! Ticket identifiers and bindings

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque service-ticket identifier (`ST-<uuid>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Prefix carried by every minted ticket
    pub const PREFIX: &'static str = "ST-";

    /// Mint a fresh random ticket identifier
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, Uuid::new_v4()))
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for logs: the prefix and the first uuid group only
    pub fn redacted(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(Self::PREFIX.len() + 8)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for TicketId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for TicketId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TicketId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Binding held for an outstanding ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Service URL the ticket was minted for
    pub service: String,
    /// Authenticated principal
    pub identity: String,
}

impl Ticket {
    /// Create a new binding
    pub fn new(service: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            identity: identity.into(),
        }
    }
}

/// Login flow flavor, decided by which query parameter named the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketFlavor {
    /// `?service=` login; redirect carries `ticket=`
    Cas,
    /// `?TARGET=` login; redirect carries `SAMLart=`
    Saml,
}

impl TicketFlavor {
    /// Query parameter the ticket is appended under on redirect
    pub fn ticket_param(self) -> &'static str {
        match self {
            Self::Cas => "ticket",
            Self::Saml => "SAMLart",
        }
    }
}
