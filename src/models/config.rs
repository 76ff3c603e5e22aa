//! Configuration module for the case tracking API
//!
//! Nilai konfigurasi dibaca dari environment, dengan default dari
//! utils/constants.rs. Deadline limits are NOT configurable here.

use tracing::info;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{DEFAULT_HOST, DEFAULT_PORT};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Shared API key; `None` disables the key check
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment
    ///
    /// Environment:
    ///   PORT / EKEJAKSAAN_PORT - Server port (default: 8080)
    ///   EKEJAKSAAN_HOST        - Server host (default: 0.0.0.0)
    ///   EKEJAKSAAN_API_KEY     - Required X-API-Key value (optional)
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("EKEJAKSAAN_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        // Hosting platforms set PORT, local dev uses EKEJAKSAAN_PORT
        let port = match lookup("PORT").or_else(|| lookup("EKEJAKSAAN_PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::invalid_config("PORT", &raw))?,
            None => defaults.port,
        };

        let api_key = lookup("EKEJAKSAAN_API_KEY").filter(|k| !k.is_empty());
        if api_key.is_some() {
            // Key is never logged
            info!("🔑 EKEJAKSAAN_API_KEY configured (key hidden)");
        }

        Ok(Self {
            host,
            port,
            api_key,
        })
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
