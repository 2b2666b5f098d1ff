//! Configuration for the CAS API service.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use mockcas_core::{CasConfig, DEFAULT_CACHE_CAPACITY};

/// CAS API configuration
///
/// Every option can also be supplied through the environment (a `.env`
/// file is loaded first).
#[derive(Clone, Parser)]
#[command(name = "cas-api", about = "Mock CAS server issuing and validating service tickets")]
pub struct Config {
    /// Password every user must present at login
    #[arg(env = "CAS_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Directory holding prepared responses as `<endpoint>/<username>`
    #[arg(env = "CAS_DATA_DIR", value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Address to bind
    #[arg(long, env = "CAS_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub address: IpAddr,

    /// HTTP server port
    #[arg(short, long, env = "CAS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Per-request timeout in seconds
    #[arg(long, env = "CAS_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Maximum number of prepared responses kept in memory
    #[arg(long, env = "CAS_CACHE_CAPACITY", default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: u64,
}

impl Config {
    /// Check values clap cannot express on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if !self.data_dir.is_dir() {
            return Err(ConfigError::DataDirMissing(self.data_dir.clone()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request timeout must be at least 1 second"));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Core broker settings
    pub fn cas(&self) -> CasConfig {
        CasConfig::new(self.secret.clone(), self.data_dir.clone())
            .with_response_cache_capacity(self.cache_capacity)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &self.data_dir)
            .field("address", &self.address)
            .field("port", &self.port)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cache_capacity", &self.cache_capacity)
            .finish_non_exhaustive()
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Shared secret must not be empty")]
    EmptySecret,

    #[error("Data directory does not exist: {}", .0.display())]
    DataDirMissing(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
