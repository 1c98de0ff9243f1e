use crate::core::{AppError, Result};
use std::env;

use super::env_or;

/// Default worker cap; SQLite serialises writers, so more rarely helps
const DEFAULT_MAX_WORKERS: usize = 4;

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            workers: num_cpus::get().clamp(1, DEFAULT_MAX_WORKERS),
        }
    }

    /// `SERVER_HOST`, `SERVER_PORT` and an optional `SERVER_WORKERS` override
    pub fn from_env() -> Result<Self> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let mut config = Self::new(host, env_or("SERVER_PORT", 8080)?);
        config.workers = env_or("SERVER_WORKERS", config.workers)?;

        if config.workers == 0 {
            return Err(AppError::configuration(
                "SERVER_WORKERS must be greater than 0",
            ));
        }
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
