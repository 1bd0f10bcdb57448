//! Push-notification transport.
//!
//! Messages are addressed to topics (`guards_{tenantId}`,
//! `residents_{tenantId}`) and carry either a human-readable notification
//! with platform sound/priority hints, or a silent data-only payload.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use safegate_core::{AppError, AppResult, Config};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AndroidConfig {
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ApnsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
    pub content_available: bool,
}

/// A topic-addressed push message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
}

impl PushMessage {
    /// Human-readable, high-priority alert with the panic sound on both
    /// platforms.
    pub fn alert(topic: String, title: &str, body: &str) -> Self {
        Self {
            topic,
            notification: Some(Notification {
                title: title.to_string(),
                body: body.to_string(),
            }),
            data: BTreeMap::new(),
            android: AndroidConfig {
                priority: "high".to_string(),
                sound: Some("siren".to_string()),
                channel_id: Some("panic_channel".to_string()),
            },
            apns: ApnsConfig {
                sound: Some("siren.mp3".to_string()),
                badge: Some(1),
                content_available: false,
            },
        }
    }

    /// Silent data-only message; the client reacts without showing a banner.
    pub fn silent(topic: String, data: BTreeMap<String, String>) -> Self {
        Self {
            topic,
            notification: None,
            data,
            android: AndroidConfig {
                priority: "high".to_string(),
                sound: None,
                channel_id: None,
            },
            apns: ApnsConfig {
                sound: None,
                badge: None,
                content_available: true,
            },
        }
    }

    pub fn is_silent(&self) -> bool {
        self.notification.is_none()
    }
}

/// Push transport contract. `send` returns the transport's message id.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(&self, message: &PushMessage) -> AppResult<String>;
}

/// HTTP push client: POSTs the message as JSON to a configured endpoint.
#[derive(Clone)]
pub struct HttpPushClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpPushClient {
    /// Create from config. Returns `None` when no push endpoint is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let endpoint = config.push_endpoint()?.to_string();
        tracing::info!(endpoint = %endpoint, "Push client initialized");
        Some(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: config.push_api_key().map(str::to_string),
        })
    }
}

#[async_trait]
impl PushTransport for HttpPushClient {
    async fn send(&self, message: &PushMessage) -> AppResult<String> {
        let mut request = self.client.post(&self.endpoint).json(message);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("push send: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "push endpoint returned {}",
                status
            )));
        }
        let body: serde_json::Value = response
            .json()
            .await
            .unwrap_or(serde_json::Value::Null);
        let message_id = body
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();
        Ok(message_id)
    }
}
