use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-tenant settings blob, written once at onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TenantSettings {
    pub allow_visitor_registration: bool,
    pub total_units: usize,
}

/// Tenant entity, persisted at `tenants/{tenantId}`.
/// The document id is derived from `name` and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub name: String,
    pub settings: TenantSettings,
    pub created_at: DateTime<Utc>,
}
