//! SafeGate Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! login-identifier derivation shared across all SafeGate components.

pub mod config;
pub mod error;
pub mod login;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use login::{derive_login_id, tenant_id_from_name};
