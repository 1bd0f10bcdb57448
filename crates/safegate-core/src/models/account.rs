use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role within a tenant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Resident,
    Security,
}

/// Account entity, persisted at `tenants/{tenantId}/accounts/{uid}`.
///
/// The same fields are persisted a second time at `accounts/{uid}` as a
/// [`GlobalAccount`]; the two copies must stay field-equal on every shared
/// key. The dual write is not transactional, so a crash between the two
/// writes leaves a detectable (and repairable) inconsistency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Opaque id assigned by the credential store at creation time.
    pub uid: String,
    /// Derived login identifier, unique per tenant.
    pub login_id: String,
    pub role: Role,
    /// Display unit/room identifier as entered at onboarding.
    pub unit: String,
    pub tenant_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Global index copy of an [`Account`], persisted at `accounts/{uid}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalAccount {
    #[serde(flatten)]
    pub account: Account,
    /// Path of the tenant-scoped copy, e.g. `/tenants/{tenantId}/accounts/{uid}`.
    pub profile_ref: String,
}
