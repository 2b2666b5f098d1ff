//! mockcas HTTP surface
//!
//! Routes the CAS 1.0, CAS 2.0 and SAML 1.1 validate endpoints plus the
//! login redirect onto a [`mockcas_core::CasService`].
//!
//! ## Endpoints
//!
//! - `GET|POST /login` - Basic-auth login, redirects with a ticket
//! - `GET|POST /validate` - CAS 1.0 plain-text validation
//! - `GET|POST /serviceValidate` - CAS 2.0 XML validation
//! - `GET|POST /samlValidate` - SAML 1.1 SOAP validation
//!
//! Everything else is `404`.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::{ApiError, ApiResult};
pub use routes::{build_router, Operation};
pub use state::AppState;
