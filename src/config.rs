//! Server configuration.
//!
//! Built once at startup and handed to the components that need it:
//! 1. Default values
//! 2. Environment variables (`ROCKET_GRPC_ADDR`, `ROCKET_GRPC_DATABASE`)
//! 3. Command-line flags, applied by the binary through [`Config::with_overrides`]

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Address the gRPC server listens on when nothing else is configured.
pub const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 50051));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Socket the gRPC server binds to.
    pub listen_addr: SocketAddr,
    /// SQLite database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            database_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("ROCKET_GRPC_ADDR") {
            config.listen_addr = addr
                .parse()
                .with_context(|| format!("Invalid ROCKET_GRPC_ADDR: {}", addr))?;
        }

        if let Some(path) = lookup("ROCKET_GRPC_DATABASE").filter(|p| !p.is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, addr: Option<SocketAddr>, database: Option<PathBuf>) -> Self {
        if let Some(addr) = addr {
            self.listen_addr = addr;
        }
        if database.is_some() {
            self.database_path = database;
        }
        self
    }
}
