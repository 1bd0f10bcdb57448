use async_trait::async_trait;
use safegate_core::AppResult;
use serde_json::Value;

/// Key-value document API the core depends on.
///
/// Paths are slash-separated (`tenants/{tenantId}/accounts/{uid}`); documents
/// are JSON objects. Implementations must treat every call as fallible so a
/// single failure never aborts an entire batch.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, path: &str) -> AppResult<Option<Value>>;

    /// Create or fully replace the document at `path`.
    async fn set(&self, path: &str, doc: Value) -> AppResult<()>;

    /// Shallow-merge `partial` into the existing document at `path`.
    /// Fails with `NotFound` when there is no document to update.
    async fn update(&self, path: &str, partial: Value) -> AppResult<()>;
}
