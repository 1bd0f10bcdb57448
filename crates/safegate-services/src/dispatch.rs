//! Alert dispatch engine.
//!
//! Driven purely by document events on `tenants/{tenantId}/alerts/{alertId}`.
//! Routing: resident-initiated alerts notify the guards topic; security-
//! initiated alerts notify the residents topic; only the open -> resolved
//! transition produces a second (silent) notification. Sends are one-shot:
//! a transport failure is logged and the record is left as-is.

use std::collections::BTreeMap;
use std::sync::Arc;

use safegate_core::models::{AlertKind, AlertRecord, AlertStatus};
use safegate_core::paths::{guards_topic, residents_topic};

use crate::push::{PushMessage, PushTransport};

const RESIDENT_ALERT_TITLE: &str = "🚨 RESIDENT PANIC ALERT! 🚨";
const RESIDENT_ALERT_BODY: &str =
    "A resident has triggered a panic alert. Please respond immediately.";
const SECURITY_ALERT_TITLE: &str = "🚨 SECURITY EMERGENCY! 🚨";
const SECURITY_ALERT_BODY: &str =
    "Emergency situation detected at the security gate. Please stay safe and follow security instructions.";

pub struct AlertDispatcher {
    push: Arc<dyn PushTransport>,
}

impl AlertDispatcher {
    pub fn new(push: Arc<dyn PushTransport>) -> Self {
        Self { push }
    }

    /// One notification per alert creation, routed by alert kind.
    pub async fn on_alert_created(&self, tenant_id: &str, alert_id: &str, record: &AlertRecord) {
        let message = match record.kind {
            AlertKind::ResidentInitiated => PushMessage::alert(
                guards_topic(tenant_id),
                RESIDENT_ALERT_TITLE,
                RESIDENT_ALERT_BODY,
            ),
            AlertKind::SecurityInitiated => PushMessage::alert(
                residents_topic(tenant_id),
                SECURITY_ALERT_TITLE,
                SECURITY_ALERT_BODY,
            ),
        };
        self.send_best_effort(tenant_id, alert_id, &message).await;
    }

    /// Only the open -> resolved edge triggers a send; any other before/after
    /// pair (including a resolved record edited on an unrelated field) is a
    /// no-op.
    pub async fn on_alert_updated(
        &self,
        tenant_id: &str,
        alert_id: &str,
        before: &AlertRecord,
        after: &AlertRecord,
    ) {
        let resolved_now = before.status != AlertStatus::Resolved
            && after.status == AlertStatus::Resolved;
        if !resolved_now {
            tracing::debug!(
                tenant_id = %tenant_id,
                alert_id = %alert_id,
                before = ?before.status,
                after = ?after.status,
                "Alert update is not a resolve transition, ignoring"
            );
            return;
        }

        let mut data = BTreeMap::new();
        data.insert("type".to_string(), "panic_resolved".to_string());
        data.insert("alertId".to_string(), alert_id.to_string());
        let message = PushMessage::silent(residents_topic(tenant_id), data);
        self.send_best_effort(tenant_id, alert_id, &message).await;
    }

    async fn send_best_effort(&self, tenant_id: &str, alert_id: &str, message: &PushMessage) {
        match self.push.send(message).await {
            Ok(message_id) => tracing::info!(
                tenant_id = %tenant_id,
                alert_id = %alert_id,
                topic = %message.topic,
                message_id = %message_id,
                silent = message.is_silent(),
                "Alert notification sent"
            ),
            Err(e) => tracing::error!(
                tenant_id = %tenant_id,
                alert_id = %alert_id,
                topic = %message.topic,
                error = %e,
                "Failed to send alert notification"
            ),
        }
    }
}
