//! Mockcas Core - Ticket broker logic
//!
//! Core single-sign-on functionality: the single-use ticket registry,
//! shared-secret login, prepared response lookup, and response formatting
//! for the plain-text, XML and SOAP validate variants.

pub mod config;
pub mod credentials;
pub mod error;
pub mod login;
pub mod registry;
pub mod resolver;
pub mod response;
pub mod saml;
pub mod service;
pub mod template;

pub use config::*;
pub use credentials::*;
pub use error::*;
pub use login::*;
pub use registry::*;
pub use resolver::*;
pub use response::{RenderedResponse, ResponseFormat, SamlEnvelope, CAS1_FAILURE};
pub use saml::extract_assertion_artifact;
pub use service::*;
