//! Configuration module
//!
//! Environment-driven configuration for the transports. Onboarding input is
//! never read from here: callers pass an explicit request struct with the
//! tenant name and unit list, so there is no process-global tenant state.

use std::env;

use crate::error::{AppError, AppResult};

/// Transport configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    environment: String,
    push_endpoint: Option<String>,
    push_api_key: Option<String>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    smtp_user: Option<String>,
    smtp_password: Option<String>,
    smtp_from: Option<String>,
    smtp_tls: bool,
}

impl Config {
    /// Load configuration from the environment (and a `.env` file if present).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let smtp_port = match env::var("SMTP_PORT") {
            Ok(raw) => Some(
                raw.parse::<u16>()
                    .map_err(|e| AppError::InvalidInput(format!("SMTP_PORT: {}", e)))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            push_endpoint: env::var("PUSH_ENDPOINT").ok(),
            push_api_key: env::var("PUSH_API_KEY").ok(),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port,
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_from: env::var("SMTP_FROM").ok(),
            smtp_tls: env::var("SMTP_TLS").map(|v| v != "false").unwrap_or(true),
        })
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn push_endpoint(&self) -> Option<&str> {
        self.push_endpoint.as_deref()
    }

    pub fn push_api_key(&self) -> Option<&str> {
        self.push_api_key.as_deref()
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> Option<u16> {
        self.smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.smtp_password.as_deref()
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.smtp_from.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.smtp_tls
    }
}
