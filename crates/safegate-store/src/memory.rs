//! In-memory store implementations.
//!
//! Used by tests and local runs. `MemoryStore` optionally feeds an
//! [`EventRouter`], which is how integration tests drive the event-triggered
//! workflows end to end.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use safegate_core::{AppError, AppResult};

use crate::credential::{Credential, CredentialStore};
use crate::document::DocumentStore;
use crate::events::EventRouter;

/// In-memory document store keyed by path.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<String, Value>>,
    router: Option<Arc<EventRouter>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that emits create/update events into `router` on every write.
    pub fn with_router(router: Arc<EventRouter>) -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
            router: Some(router),
        }
    }

    /// Number of stored documents. Test observability.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> AppResult<Option<Value>> {
        Ok(self.docs.read().await.get(path).cloned())
    }

    async fn set(&self, path: &str, doc: Value) -> AppResult<()> {
        let before = {
            let mut docs = self.docs.write().await;
            docs.insert(path.to_string(), doc.clone())
        };
        // Lock is released before handlers run; a handler may write back
        // into this store.
        if let Some(router) = &self.router {
            match before {
                None => router.dispatch_create(path, doc).await,
                Some(before) => router.dispatch_update(path, before, doc).await,
            }
        }
        Ok(())
    }

    async fn update(&self, path: &str, partial: Value) -> AppResult<()> {
        let (before, after) = {
            let mut docs = self.docs.write().await;
            let existing = docs
                .get(path)
                .cloned()
                .ok_or_else(|| AppError::NotFound(path.to_string()))?;
            let merged = shallow_merge(&existing, &partial)?;
            docs.insert(path.to_string(), merged.clone());
            (existing, merged)
        };
        if let Some(router) = &self.router {
            router.dispatch_update(path, before, after).await;
        }
        Ok(())
    }
}

fn shallow_merge(existing: &Value, partial: &Value) -> AppResult<Value> {
    let (Value::Object(base), Value::Object(patch)) = (existing, partial) else {
        return Err(AppError::InvalidInput(
            "update requires JSON objects".to_string(),
        ));
    };
    let mut merged = base.clone();
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }
    Ok(Value::Object(merged))
}

struct StoredCredential {
    uid: String,
    password: String,
}

/// In-memory credential store keyed by login id.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a login id / password pair, the way a client login would.
    pub async fn verify_password(&self, login_id: &str, password: &str) -> bool {
        self.entries
            .read()
            .await
            .get(login_id)
            .is_some_and(|c| c.password == password)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_by_login_id(&self, login_id: &str) -> AppResult<Option<Credential>> {
        Ok(self.entries.read().await.get(login_id).map(|c| Credential {
            uid: c.uid.clone(),
            login_id: login_id.to_string(),
        }))
    }

    async fn create(&self, login_id: &str, password: &str) -> AppResult<Credential> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(login_id) {
            return Err(AppError::AlreadyExists(login_id.to_string()));
        }
        let uid = Uuid::new_v4().to_string();
        entries.insert(
            login_id.to_string(),
            StoredCredential {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        Ok(Credential {
            uid,
            login_id: login_id.to_string(),
        })
    }

    async fn update_password(&self, uid: &str, password: &str) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .values_mut()
            .find(|c| c.uid == uid)
            .ok_or_else(|| AppError::NotFound(format!("credential uid {}", uid)))?;
        entry.password = password.to_string();
        Ok(())
    }
}
