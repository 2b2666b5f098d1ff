//! Mockcas Types - Shared domain types
//!
//! This crate contains domain types used across mockcas crates:
//! - Ticket identifiers and their service/identity bindings
//! - Login flavors (CAS vs. SAML-style redirects)
//! - Validate endpoint variants

pub mod endpoint;
pub mod error;
pub mod ticket;

pub use endpoint::*;
pub use error::*;
pub use ticket::*;
