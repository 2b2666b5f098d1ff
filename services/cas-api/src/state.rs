//! Application state

use std::sync::Arc;
use std::time::Duration;

use mockcas_core::CasService;

use crate::config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Ticket broker (login, validation)
    pub cas: Arc<CasService>,
    request_timeout: Duration,
}

impl AppState {
    /// Create new application state
    pub fn new(cas: CasService, request_timeout: Duration) -> Self {
        Self {
            cas: Arc::new(cas),
            request_timeout,
        }
    }

    /// State backed by the prepared responses under `config.data_dir`
    pub fn from_config(config: &Config) -> Self {
        Self::new(CasService::from_config(&config.cas()), config.request_timeout())
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
