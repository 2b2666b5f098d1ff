//! Common error types

use thiserror::Error;

/// Errors raised while parsing shared domain types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Path segment does not name a validate endpoint
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),
}
