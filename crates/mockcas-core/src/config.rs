//! Configuration types for the ticket broker

use std::path::PathBuf;

use crate::resolver::DEFAULT_CACHE_CAPACITY;

/// Core broker configuration
#[derive(Clone)]
pub struct CasConfig {
    /// Password every user must present at login
    pub secret: String,
    /// Root of the prepared response files (`<data_dir>/<endpoint>/<identity>`)
    pub data_dir: PathBuf,
    /// Maximum number of prepared responses held in memory
    pub response_cache_capacity: u64,
}

impl CasConfig {
    /// Create a new config with the default cache capacity
    pub fn new(secret: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            secret: secret.into(),
            data_dir: data_dir.into(),
            response_cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Set the response cache capacity
    pub fn with_response_cache_capacity(mut self, capacity: u64) -> Self {
        self.response_cache_capacity = capacity;
        self
    }
}

impl std::fmt::Debug for CasConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CasConfig")
            .field("data_dir", &self.data_dir)
            .field("response_cache_capacity", &self.response_cache_capacity)
            .finish_non_exhaustive()
    }
}
