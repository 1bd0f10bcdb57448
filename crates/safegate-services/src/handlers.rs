//! Event-handler adapters.
//!
//! These are the sole entry points the external event substrate invokes:
//! alert create/update and password-reset create. Each adapter decodes the
//! event into typed records and delegates; decode failures surface as errors
//! that the router logs and swallows.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use safegate_core::models::{AlertRecord, PasswordResetRequest};
use safegate_core::{AppError, AppResult};
use safegate_store::{DocEvent, DocEventHandler, EventRouter};

use crate::dispatch::AlertDispatcher;
use crate::recovery::RecoveryService;

pub const ALERT_PATTERN: &str = "tenants/{tenantId}/alerts/{alertId}";
pub const PASSWORD_RESET_PATTERN: &str = "passwordResets/{requestId}";

/// Register dispatch and recovery on the router. Onboarding is not wired
/// here; it is a direct function call, never an event handler.
pub fn register_handlers(
    router: &EventRouter,
    dispatcher: Arc<AlertDispatcher>,
    recovery: Arc<RecoveryService>,
) {
    router.on_create(
        ALERT_PATTERN,
        Arc::new(AlertCreated {
            dispatcher: dispatcher.clone(),
        }),
    );
    router.on_update(ALERT_PATTERN, Arc::new(AlertUpdated { dispatcher }));
    router.on_create(PASSWORD_RESET_PATTERN, Arc::new(ResetRequested { recovery }));
}

fn decode<T: serde::de::DeserializeOwned>(doc: Option<Value>, what: &str) -> AppResult<T> {
    let doc = doc.ok_or_else(|| AppError::InvalidInput(format!("missing {} snapshot", what)))?;
    serde_json::from_value(doc)
        .map_err(|e| AppError::InvalidInput(format!("undecodable {} snapshot: {}", what, e)))
}

fn param<'a>(event: &'a DocEvent, name: &str) -> AppResult<&'a str> {
    event
        .param(name)
        .ok_or_else(|| AppError::Internal(format!("missing path param {}", name)))
}

struct AlertCreated {
    dispatcher: Arc<AlertDispatcher>,
}

#[async_trait]
impl DocEventHandler for AlertCreated {
    async fn handle(&self, event: DocEvent) -> AppResult<()> {
        let tenant_id = param(&event, "tenantId")?;
        let alert_id = param(&event, "alertId")?;
        let record: AlertRecord = decode(event.after.clone(), "alert")?;
        self.dispatcher
            .on_alert_created(tenant_id, alert_id, &record)
            .await;
        Ok(())
    }
}

struct AlertUpdated {
    dispatcher: Arc<AlertDispatcher>,
}

#[async_trait]
impl DocEventHandler for AlertUpdated {
    async fn handle(&self, event: DocEvent) -> AppResult<()> {
        let tenant_id = param(&event, "tenantId")?;
        let alert_id = param(&event, "alertId")?;
        let before: AlertRecord = decode(event.before.clone(), "alert before")?;
        let after: AlertRecord = decode(event.after.clone(), "alert after")?;
        self.dispatcher
            .on_alert_updated(tenant_id, alert_id, &before, &after)
            .await;
        Ok(())
    }
}

struct ResetRequested {
    recovery: Arc<RecoveryService>,
}

#[async_trait]
impl DocEventHandler for ResetRequested {
    async fn handle(&self, event: DocEvent) -> AppResult<()> {
        let request_id = param(&event, "requestId")?;
        let request: PasswordResetRequest = decode(event.after.clone(), "reset request")?;
        self.recovery.on_reset_requested(request_id, &request).await;
        Ok(())
    }
}
