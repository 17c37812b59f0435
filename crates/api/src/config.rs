//! HTTP server configuration.

use std::net::{Ipv4Addr, SocketAddr};

use myshop_infra::ConfigError;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    port: u16,
}

impl ServerConfig {
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Read `PORT`, falling back to [`DEFAULT_PORT`] when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(raw) = lookup("PORT").filter(|v| !v.trim().is_empty()) else {
            tracing::info!(port = DEFAULT_PORT, "PORT not set; using default");
            return Ok(Self::new(DEFAULT_PORT));
        };

        let port = raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
            var: "PORT",
            reason: format!("{raw:?}: {e}"),
        })?;
        Ok(Self::new(port))
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
