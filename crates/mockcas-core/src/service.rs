//! CAS service - ties together credential checks, the ticket registry and
//! prepared response lookup

use std::sync::Arc;

use mockcas_types::{Endpoint, TicketId};

use crate::{
    config::CasConfig,
    credentials::{BasicCredentials, SharedSecret},
    login::LoginTarget,
    registry::TicketRegistry,
    resolver::{FileResolver, ResponseResolver},
    AuthError, ProtocolResult,
};

/// Ticket broker
///
/// Provides unified interface for:
/// - Login (shared-secret check, ticket issue)
/// - Validation (ticket redemption, prepared response lookup)
pub struct CasService {
    secret: SharedSecret,
    registry: TicketRegistry,
    resolver: Arc<dyn ResponseResolver>,
}

impl CasService {
    /// Create a new service with an explicit resolver
    pub fn new(secret: SharedSecret, resolver: Arc<dyn ResponseResolver>) -> Self {
        Self {
            secret,
            registry: TicketRegistry::new(),
            resolver,
        }
    }

    /// Create a service serving prepared responses from `config.data_dir`
    pub fn from_config(config: &CasConfig) -> Self {
        let resolver = FileResolver::new(&config.data_dir, config.response_cache_capacity);
        Self::new(SharedSecret::new(config.secret.clone()), Arc::new(resolver))
    }

    /// Authenticate `credentials` and mint a ticket for `target`
    pub fn login(
        &self,
        target: &LoginTarget,
        credentials: &BasicCredentials,
    ) -> Result<TicketId, AuthError> {
        if !self.secret.verify(credentials.password()) {
            tracing::debug!(user = credentials.username(), "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.registry.issue(target.service(), credentials.username()))
    }

    /// Redeem `ticket` for `service` and look up the prepared response
    /// for the identity it names
    pub async fn validate(
        &self,
        endpoint: Endpoint,
        ticket: Option<&str>,
        service: Option<&str>,
    ) -> ProtocolResult<Arc<str>> {
        let identity = self.registry.redeem(ticket, service)?;
        self.resolver.resolve(endpoint, &identity).await
    }

    /// Outstanding tickets
    pub fn registry(&self) -> &TicketRegistry {
        &self.registry
    }
}

impl std::fmt::Debug for CasService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CasService")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
