#![allow(dead_code)]

//! Shared test fixtures: recording transports and a wired-up world.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use safegate_core::{AppError, AppResult};
use safegate_services::{
    register_handlers, AlertDispatcher, EmailTransport, IdentityDirectory, OutboundEmail,
    PushMessage, PushTransport, RecoveryService,
};
use safegate_store::{
    Credential, CredentialStore, EventRouter, MemoryCredentialStore, MemoryStore,
};

/// Push transport that records every message; can be switched to fail.
#[derive(Default)]
pub struct RecordingPush {
    sent: Mutex<Vec<PushMessage>>,
    fail: AtomicBool,
}

impl RecordingPush {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_next_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub async fn messages(&self) -> Vec<PushMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl PushTransport for RecordingPush {
    async fn send(&self, message: &PushMessage) -> AppResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Transport("push transport down".to_string()));
        }
        let mut sent = self.sent.lock().await;
        sent.push(message.clone());
        Ok(format!("msg-{}", sent.len()))
    }
}

/// Email transport that records every message; can be switched to fail.
#[derive(Default)]
pub struct RecordingEmail {
    sent: Mutex<Vec<OutboundEmail>>,
    fail: AtomicBool,
}

impl RecordingEmail {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_next_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub async fn messages(&self) -> Vec<OutboundEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailTransport for RecordingEmail {
    async fn send(&self, email: &OutboundEmail) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Transport("email transport down".to_string()));
        }
        self.sent.lock().await.push(email.clone());
        Ok(())
    }
}

/// Credential store that fails creation for chosen login ids, delegating
/// everything else. Used to exercise per-item failure isolation.
pub struct FlakyCredentialStore {
    inner: MemoryCredentialStore,
    reject: HashSet<String>,
}

impl FlakyCredentialStore {
    pub fn rejecting(logins: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryCredentialStore::new(),
            reject: logins.iter().map(|s| s.to_string()).collect(),
        })
    }
}

#[async_trait]
impl CredentialStore for FlakyCredentialStore {
    async fn get_by_login_id(&self, login_id: &str) -> AppResult<Option<Credential>> {
        self.inner.get_by_login_id(login_id).await
    }

    async fn create(&self, login_id: &str, password: &str) -> AppResult<Credential> {
        if self.reject.contains(login_id) {
            return Err(AppError::Transport("credential store unavailable".to_string()));
        }
        self.inner.create(login_id, password).await
    }

    async fn update_password(&self, uid: &str, password: &str) -> AppResult<()> {
        self.inner.update_password(uid, password).await
    }
}

/// Everything wired together around the in-memory store and event router.
pub struct World {
    pub docs: Arc<MemoryStore>,
    pub credentials: Arc<MemoryCredentialStore>,
    pub push: Arc<RecordingPush>,
    pub email: Arc<RecordingEmail>,
    pub directory: IdentityDirectory,
}

pub fn world() -> World {
    let router = Arc::new(EventRouter::new());
    let docs = Arc::new(MemoryStore::with_router(router.clone()));
    let credentials = Arc::new(MemoryCredentialStore::new());
    let push = RecordingPush::new();
    let email = RecordingEmail::new();

    let dispatcher = Arc::new(AlertDispatcher::new(push.clone()));
    let recovery = Arc::new(RecoveryService::new(
        docs.clone(),
        credentials.clone(),
        email.clone(),
    ));
    register_handlers(&router, dispatcher, recovery);

    let directory = IdentityDirectory::new(docs.clone(), credentials.clone());
    World {
        docs,
        credentials,
        push,
        email,
        directory,
    }
}
