//! Ticket-lifecycle and authentication errors

use thiserror::Error;

/// Ticket-lifecycle failure, reported in-band by every validate variant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Ticket or service absent/empty at redeem
    #[error("INVALID_REQUEST: E_MISSING_PARAMETERS")]
    MissingParameters,

    /// Ticket unknown or already consumed
    #[error("INVALID_TICKET: E_TICKET_NOT_FOUND")]
    TicketNotFound,

    /// Ticket redeemed against a different service than it was issued for
    #[error("INVALID_SERVICE: E_SERVICE_MISMATCH")]
    ServiceMismatch,

    /// No prepared response exists for the (endpoint, identity) pair
    #[error("INTERNAL_ERROR: E_FILE_NOT_FOUND")]
    ResponseNotFound,

    /// Prepared response exists but could not be read
    #[error("INTERNAL_ERROR: E_IO_ERROR ({0})")]
    ResponseIo(String),
}

impl ProtocolError {
    /// Protocol error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingParameters => "INVALID_REQUEST",
            Self::TicketNotFound => "INVALID_TICKET",
            Self::ServiceMismatch => "INVALID_SERVICE",
            Self::ResponseNotFound | Self::ResponseIo(_) => "INTERNAL_ERROR",
        }
    }

    /// Protocol detail code
    pub fn detail_code(&self) -> &'static str {
        match self {
            Self::MissingParameters => "E_MISSING_PARAMETERS",
            Self::TicketNotFound => "E_TICKET_NOT_FOUND",
            Self::ServiceMismatch => "E_SERVICE_MISMATCH",
            Self::ResponseNotFound => "E_FILE_NOT_FOUND",
            Self::ResponseIo(_) => "E_IO_ERROR",
        }
    }
}

/// Login authentication failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header on the request
    #[error("missing authorization")]
    MissingAuthorization,

    /// Authorization header is not a decodable Basic credential
    #[error("malformed authorization")]
    MalformedAuthorization,

    /// Password does not match the shared secret
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Result type for ticket-lifecycle operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;
