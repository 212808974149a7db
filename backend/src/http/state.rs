//! Application state for the HTTP server.

use std::sync::Arc;

use axum::http::{header, HeaderMap, Uri};

use crate::config::ServerConfig;
use crate::services::share_link::Origin;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new application state with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Origin the current page was served from.
    ///
    /// `PUBLIC_ORIGIN` wins when configured. Otherwise the `Host` header, or
    /// the request URI authority for HTTP/2 `:authority` requests, is combined
    /// with `X-Forwarded-Proto` (first value, default `http`).
    pub fn page_origin(&self, headers: &HeaderMap, uri: &Uri) -> Result<Origin, String> {
        if let Some(origin) = &self.config.public_origin {
            return Ok(origin.clone());
        }
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| uri.authority().map(|a| a.as_str()))
            .ok_or_else(|| "missing or unreadable Host header".to_string())?;
        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("http");
        Origin::from_parts(scheme, host.trim()).map_err(|e| e.to_string())
    }
}
