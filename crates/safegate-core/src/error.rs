//! Error types module
//!
//! All errors are unified under the `AppError` enum. The taxonomy matters for
//! control flow: `AlreadyExists` is treated as success by account creation,
//! `NotFound` is terminal for the recovery workflow, and `Transport` failures
//! are logged and swallowed by the event handlers.

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Credential-store hit during creation. Creation paths treat this as
    /// success, not error.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Push, email, or document-store call failed. Never retried.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True when a creation path may treat this error as a no-op success.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, AppError::AlreadyExists(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("serialization: {}", e))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_is_distinguishable() {
        let err = AppError::AlreadyExists("101@demo.app".to_string());
        assert!(err.is_already_exists());
        assert!(!err.is_not_found());
    }

    #[test]
    fn error_messages_carry_context() {
        let err = AppError::NotFound("accounts/abc".to_string());
        assert_eq!(err.to_string(), "Not found: accounts/abc");
    }
}
