//! Prepared response lookup
//!
//! Validate endpoints answer a successful redemption with a body prepared
//! ahead of time for the (endpoint, identity) pair. [`FileResolver`] serves
//! them from `<data_dir>/<endpoint>/<identity>`; [`MemoryResolver`] keeps them
//! in memory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use mockcas_types::Endpoint;
use moka::future::Cache;

use crate::{ProtocolError, ProtocolResult};

/// Default number of cached response bodies
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Read-only store of prepared response bodies
#[async_trait]
pub trait ResponseResolver: Send + Sync {
    /// Look up the body prepared for `identity` on `endpoint`
    async fn resolve(&self, endpoint: Endpoint, identity: &str) -> ProtocolResult<Arc<str>>;
}

#[async_trait]
impl<R: ResponseResolver + ?Sized> ResponseResolver for Arc<R> {
    async fn resolve(&self, endpoint: Endpoint, identity: &str) -> ProtocolResult<Arc<str>> {
        (**self).resolve(endpoint, identity).await
    }
}

/// Filesystem-backed resolver with a bounded in-memory cache.
///
/// Successful reads are cached for the life of the process; failures are
/// not, so a file added later is picked up on the next request.
#[derive(Clone)]
pub struct FileResolver {
    data_dir: PathBuf,
    cache: Cache<(Endpoint, String), Arc<str>>,
}

impl FileResolver {
    /// Create a resolver rooted at `data_dir` caching up to `capacity` bodies
    pub fn new(data_dir: impl Into<PathBuf>, capacity: u64) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Root data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Number of cached bodies (approximate, see `moka::future::Cache::entry_count`)
    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }

    fn response_path(&self, endpoint: Endpoint, identity: &str) -> Option<PathBuf> {
        if !is_safe_file_name(identity) {
            return None;
        }
        Some(self.data_dir.join(endpoint.name()).join(identity))
    }
}

#[async_trait]
impl ResponseResolver for FileResolver {
    async fn resolve(&self, endpoint: Endpoint, identity: &str) -> ProtocolResult<Arc<str>> {
        let Some(path) = self.response_path(endpoint, identity) else {
            tracing::debug!(identity, "Identity is not a plain file name");
            return Err(ProtocolError::ResponseNotFound);
        };

        self.cache
            .try_get_with((endpoint, identity.to_string()), read_response(path))
            .await
            .map_err(|e| (*e).clone())
    }
}

impl std::fmt::Debug for FileResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileResolver")
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}

async fn read_response(path: PathBuf) -> ProtocolResult<Arc<str>> {
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Ok(Arc::from(body)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Response file not found");
            Err(ProtocolError::ResponseNotFound)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read response file");
            Err(ProtocolError::ResponseIo(e.to_string()))
        }
    }
}

/// Identities become file names; anything that could escape the endpoint
/// directory is refused.
fn is_safe_file_name(identity: &str) -> bool {
    !identity.is_empty()
        && identity != "."
        && identity != ".."
        && !identity.contains(['/', '\\', '\0'])
}

/// In-memory resolver for tests and embedding
#[derive(Clone, Default)]
pub struct MemoryResolver {
    bodies: Arc<DashMap<(Endpoint, String), Arc<str>>>,
}

impl MemoryResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body for (endpoint, identity), replacing any previous one
    pub fn insert(&self, endpoint: Endpoint, identity: impl Into<String>, body: impl Into<Arc<str>>) {
        self.bodies.insert((endpoint, identity.into()), body.into());
    }

    /// Builder-style [`MemoryResolver::insert`]
    #[must_use]
    pub fn with(self, endpoint: Endpoint, identity: impl Into<String>, body: impl Into<Arc<str>>) -> Self {
        self.insert(endpoint, identity, body);
        self
    }
}

#[async_trait]
impl ResponseResolver for MemoryResolver {
    async fn resolve(&self, endpoint: Endpoint, identity: &str) -> ProtocolResult<Arc<str>> {
        self.bodies
            .get(&(endpoint, identity.to_string()))
            .map(|body| Arc::clone(body.value()))
            .ok_or(ProtocolError::ResponseNotFound)
    }
}

impl std::fmt::Debug for MemoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryResolver")
            .field("entries", &self.bodies.len())
            .finish()
    }
}
