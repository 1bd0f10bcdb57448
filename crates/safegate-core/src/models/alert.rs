use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who raised the alert. Routing depends on this: resident-initiated alerts
/// notify the guards topic, security-initiated alerts notify the residents
/// topic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    SecurityInitiated,
    ResidentInitiated,
}

/// Alert lifecycle. `open` -> `resolved` is the only defined transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Open,
    Resolved,
}

/// Alert entity, persisted at `tenants/{tenantId}/alerts/{alertId}`.
/// Created and updated by the client apps; this system only observes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub kind: AlertKind,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
