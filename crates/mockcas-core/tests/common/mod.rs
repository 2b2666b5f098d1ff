//! Shared test utilities

#![allow(dead_code)]

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use mockcas_core::{CasService, MemoryResolver, SharedSecret};
use mockcas_types::Endpoint;

pub const SECRET: &str = "s3cret";

/// `Authorization` header value for `user:password`
pub fn basic_header(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

/// Resolver with a prepared response for `identity` on every endpoint
pub fn resolver_for(identity: &str) -> MemoryResolver {
    MemoryResolver::new()
        .with(Endpoint::Validate, identity, format!("yes\n{identity}\n"))
        .with(
            Endpoint::ServiceValidate,
            identity,
            format!("<cas:user>{identity}</cas:user>"),
        )
        .with(
            Endpoint::SamlValidate,
            identity,
            format!("<Response ResponseID=\"{{id}}\"><NameIdentifier>{identity}</NameIdentifier></Response>"),
        )
}

/// Service whose secret is [`SECRET`] with responses for `identity`
pub fn service_for(identity: &str) -> CasService {
    CasService::new(SharedSecret::new(SECRET), Arc::new(resolver_for(identity)))
}
