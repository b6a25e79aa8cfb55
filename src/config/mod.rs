use crate::core::{AppError, Result};
use std::env;

pub mod server;

pub use server::ServerConfig;

const DEFAULT_KEEPALIVE_INTERVAL_SECS: u64 = 600;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    /// Present only when `KEEPALIVE_URL` is set
    pub keepalive: Option<KeepAliveConfig>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct KeepAliveConfig {
    pub url: String,
    pub interval_secs: u64,
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.env == "development"
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let log_format = match env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            other => {
                return Err(AppError::configuration(format!(
                    "Invalid LOG_FORMAT: {}",
                    other
                )))
            }
        };

        let keepalive = match env::var("KEEPALIVE_URL") {
            Ok(url) if !url.trim().is_empty() => Some(KeepAliveConfig {
                url,
                interval_secs: env::var("KEEPALIVE_INTERVAL_SECS")
                    .unwrap_or_else(|_| DEFAULT_KEEPALIVE_INTERVAL_SECS.to_string())
                    .parse()
                    .map_err(|_| AppError::configuration("Invalid KEEPALIVE_INTERVAL_SECS"))?,
            }),
            _ => None,
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format,
            },
            server: ServerConfig::from_env()?,
            keepalive,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.workers == 0 {
            return Err(AppError::configuration(
                "Server workers must be greater than 0",
            ));
        }

        if let Some(keepalive) = &self.keepalive {
            if keepalive.interval_secs == 0 {
                return Err(AppError::configuration(
                    "Keep-alive interval must be greater than 0",
                ));
            }

            if !keepalive.url.starts_with("http://") && !keepalive.url.starts_with("https://") {
                return Err(AppError::configuration(format!(
                    "KEEPALIVE_URL must be an http(s) URL, got {}",
                    keepalive.url
                )));
            }
        }

        if !self.app.is_development() && self.server.cors_allowed_origin.is_none() {
            tracing::warn!("CORS_ALLOWED_ORIGIN not set; cross-origin requests will be rejected");
        }

        Ok(())
    }
}
