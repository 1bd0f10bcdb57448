use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResetStatus {
    Pending,
    Completed,
    Failed,
}

/// Password reset request, persisted at `passwordResets/{requestId}`.
///
/// Created by an external actor with `status: pending`; the recovery workflow
/// writes exactly one terminal status (`completed` or `failed`) per request.
/// A failed request is never retried; the user files a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub tenant_name: String,
    pub unit: String,
    /// Out-of-band contact address the temporary credential is mailed to.
    pub email: String,
    pub temp_password: String,
    pub status: ResetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}
