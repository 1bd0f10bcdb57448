//! Password recovery workflow.
//!
//! Triggered by creation of a `passwordResets/{requestId}` document.
//! Re-derives the login identifier with the same function used at account
//! creation, rotates the credential to the supplied temporary value, mails
//! the requester, and writes exactly one terminal status back onto the
//! request. No retries; a failed request requires a new request record.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use safegate_core::models::{PasswordResetRequest, ResetStatus};
use safegate_core::{derive_login_id, paths, AppError, AppResult};
use safegate_store::{CredentialStore, DocumentStore};

use crate::email::{EmailTransport, OutboundEmail};

pub struct RecoveryService {
    docs: Arc<dyn DocumentStore>,
    credentials: Arc<dyn CredentialStore>,
    email: Arc<dyn EmailTransport>,
}

impl RecoveryService {
    pub fn new(
        docs: Arc<dyn DocumentStore>,
        credentials: Arc<dyn CredentialStore>,
        email: Arc<dyn EmailTransport>,
    ) -> Self {
        Self {
            docs,
            credentials,
            email,
        }
    }

    /// Process a newly created reset request and persist the terminal status.
    pub async fn on_reset_requested(&self, request_id: &str, request: &PasswordResetRequest) {
        if request.status != ResetStatus::Pending {
            tracing::debug!(
                request_id = %request_id,
                status = ?request.status,
                "Reset request not pending, ignoring"
            );
            return;
        }

        let patch = match self.process(request).await {
            Ok(()) => {
                tracing::info!(request_id = %request_id, "Password reset completed");
                json!({ "status": "completed", "processedAt": Utc::now() })
            }
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Password reset failed");
                json!({ "status": "failed", "error": e.to_string() })
            }
        };

        if let Err(e) = self
            .docs
            .update(&paths::password_reset_doc(request_id), patch)
            .await
        {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "Failed to write terminal status on reset request"
            );
        }
    }

    async fn process(&self, request: &PasswordResetRequest) -> AppResult<()> {
        // Same derivation as account creation; a lookup miss here is terminal.
        let login_id = derive_login_id(&request.tenant_name, &request.unit);
        let credential = self
            .credentials
            .get_by_login_id(&login_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no account for {}", login_id)))?;

        self.credentials
            .update_password(&credential.uid, &request.temp_password)
            .await?;

        // The temporary value goes out in clear text; it is short-lived and
        // the client forces a change on next login.
        self.email
            .send(&OutboundEmail {
                to: request.email.clone(),
                subject: "Your SafeGate Temporary Password".to_string(),
                body: format!(
                    "Your password for {}, unit {} has been reset.\n\n\
                     Temporary password: {}\n\n\
                     Please log in and change your password immediately.",
                    request.tenant_name, request.unit, request.temp_password
                ),
            })
            .await?;
        Ok(())
    }
}
