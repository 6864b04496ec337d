//! Gateway configuration
//!
//! Loaded from environment variables (and `.env` in debug builds).

use anyhow::{Context, Result};
use std::env;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub services: ServiceEndpoints,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    pub catalog_service: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) && dotenvy::dotenv().is_ok() {
            info!("Loaded .env file for development");
        }

        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("HTTP_PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .context("Invalid HTTP_PORT")?,
            },
            services: ServiceEndpoints {
                catalog_service: env::var("CATALOG_GRPC_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:50051".to_string()),
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
