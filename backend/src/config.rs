//! Server configuration and environment variable handling.

use std::env;
use std::net::SocketAddr;

use crate::services::share_link::Origin;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a valid port number (got '{0}')")]
    InvalidPort(String),
    #[error("PUBLIC_ORIGIN must be an absolute http(s) origin (got '{0}')")]
    InvalidOrigin(String),
    #[error("'{0}' is not a valid bind address")]
    InvalidBindAddress(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub host: String,
    /// Port to bind (default: 8080)
    pub port: u16,
    /// Origin used for share links instead of the request's `Host` header
    pub public_origin: Option<Origin>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_origin: None,
        }
    }
}

impl ServerConfig {
    /// Load the configuration from the environment.
    ///
    /// # Environment Variables
    /// - `HOST` (optional, default: 0.0.0.0)
    /// - `PORT` (optional, default: 8080)
    /// - `PUBLIC_ORIGIN` (optional): e.g. `https://vision.example.com`
    ///
    /// # Errors
    /// Returns an error if `PORT` or `PUBLIC_ORIGIN` is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => defaults.port,
        };
        let public_origin = match env::var("PUBLIC_ORIGIN") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                Origin::parse(&raw).map_err(|_| ConfigError::InvalidOrigin(raw.clone()))?,
            ),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            public_origin,
        })
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidBindAddress(addr))
    }
}
