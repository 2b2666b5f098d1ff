//! HTTP handlers

mod login;
mod validate;

pub use login::login;
pub use validate::{saml_validate, service_validate, validate};
