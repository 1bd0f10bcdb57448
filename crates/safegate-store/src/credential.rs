use async_trait::async_trait;
use safegate_core::AppResult;

/// Entry in the external credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Opaque id assigned by the store at creation time.
    pub uid: String,
    pub login_id: String,
}

/// Credential store contract.
///
/// `create` fails with `AlreadyExists` on a duplicate login id; the identity
/// directory treats that as success so repeated onboarding runs converge.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get_by_login_id(&self, login_id: &str) -> AppResult<Option<Credential>>;

    async fn create(&self, login_id: &str, password: &str) -> AppResult<Credential>;

    /// Rotate the credential for an existing entry. `NotFound` on unknown uid.
    async fn update_password(&self, uid: &str, password: &str) -> AppResult<()>;
}
