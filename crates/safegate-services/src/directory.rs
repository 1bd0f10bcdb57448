//! Identity directory.
//!
//! Owns account creation/lookup and the dual write of profile documents:
//! once under the tenant-scoped collection, once under the flat global index
//! with a `profileRef` back to the tenant-scoped path. The dual write is
//! deliberately not transactional; `create_or_get_account` repairs missing
//! copies on re-run, so onboarding is convergent.

use std::sync::Arc;

use chrono::Utc;

use safegate_core::models::{Account, GlobalAccount, Role, Tenant, TenantSettings};
use safegate_core::{derive_login_id, paths, tenant_id_from_name, AppError, AppResult};
use safegate_store::{Credential, CredentialStore, DocumentStore};

/// Unit identifier assigned to the security account of every tenant.
pub const SECURITY_UNIT: &str = "000";

/// Explicit onboarding input. Callers build this from their own arguments;
/// nothing is read from process-global state.
#[derive(Debug, Clone)]
pub struct OnboardingRequest {
    pub tenant_name: String,
    pub unit_ids: Vec<String>,
    pub resident_password: String,
    pub security_password: String,
}

/// One `(tenant, unit)` pair for a directory sync run.
#[derive(Debug, Clone)]
pub struct SyncEntry {
    pub tenant_name: String,
    pub unit: String,
    pub password: String,
}

/// Per-item outcome of a batch run. Failures never abort sibling items.
#[derive(Debug, Default)]
pub struct DirectoryReport {
    /// Login ids whose credential entry was newly created.
    pub created: Vec<String>,
    /// Login ids that already existed (idempotent re-run).
    pub existing: Vec<String>,
    /// `(login id, error)` for items that failed.
    pub failed: Vec<(String, String)>,
}

pub struct IdentityDirectory {
    docs: Arc<dyn DocumentStore>,
    credentials: Arc<dyn CredentialStore>,
}

impl IdentityDirectory {
    pub fn new(docs: Arc<dyn DocumentStore>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { docs, credentials }
    }

    /// Create the account for `(tenant, unit)`, or converge on the existing
    /// one. An existing login id is success, not error.
    pub async fn create_or_get_account(
        &self,
        tenant_id: &str,
        tenant_name: &str,
        unit: &str,
        role: Role,
        password: &str,
    ) -> AppResult<Account> {
        let (account, _) = self
            .ensure_account(tenant_id, tenant_name, unit, role, password, None)
            .await?;
        Ok(account)
    }

    /// Onboard a tenant: tenant document, one security account, one resident
    /// account per unit. Per-account failures are logged and isolated.
    pub async fn create_tenant(
        &self,
        request: &OnboardingRequest,
    ) -> AppResult<(String, DirectoryReport)> {
        let tenant_id = tenant_id_from_name(&request.tenant_name);
        tracing::info!(tenant_id = %tenant_id, tenant_name = %request.tenant_name, "Onboarding tenant");

        let tenant = Tenant {
            name: request.tenant_name.clone(),
            settings: TenantSettings {
                allow_visitor_registration: true,
                total_units: request.unit_ids.len(),
            },
            created_at: Utc::now(),
        };
        self.docs
            .set(&paths::tenant_doc(&tenant_id), serde_json::to_value(&tenant)?)
            .await?;

        let mut report = DirectoryReport::default();
        self.track(
            &mut report,
            &tenant_id,
            &request.tenant_name,
            SECURITY_UNIT,
            Role::Security,
            &request.security_password,
            None,
        )
        .await;
        for unit in &request.unit_ids {
            self.track(
                &mut report,
                &tenant_id,
                &request.tenant_name,
                unit,
                Role::Resident,
                &request.resident_password,
                None,
            )
            .await;
        }
        Ok((tenant_id, report))
    }

    /// Reconciliation pass: ensure tenant and resident account documents
    /// exist for each entry, repairing directory drift for credentials that
    /// already exist. Safe to re-run.
    pub async fn sync_directory(&self, entries: &[SyncEntry]) -> DirectoryReport {
        let mut report = DirectoryReport::default();
        for entry in entries {
            let tenant_id = tenant_id_from_name(&entry.tenant_name);
            if let Err(e) = self.ensure_tenant_doc(&tenant_id, &entry.tenant_name).await {
                tracing::warn!(tenant_id = %tenant_id, error = %e, "Skipping sync entry");
                report
                    .failed
                    .push((derive_login_id(&entry.tenant_name, &entry.unit), e.to_string()));
                continue;
            }
            self.track(
                &mut report,
                &tenant_id,
                &entry.tenant_name,
                &entry.unit,
                Role::Resident,
                &entry.password,
                Some(format!("Resident of {}", entry.unit)),
            )
            .await;
        }
        report
    }

    async fn ensure_tenant_doc(&self, tenant_id: &str, tenant_name: &str) -> AppResult<()> {
        let path = paths::tenant_doc(tenant_id);
        if self.docs.get(&path).await?.is_some() {
            return Ok(());
        }
        let tenant = Tenant {
            name: tenant_name.to_string(),
            settings: TenantSettings {
                allow_visitor_registration: true,
                total_units: 0,
            },
            created_at: Utc::now(),
        };
        self.docs.set(&path, serde_json::to_value(&tenant)?).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn track(
        &self,
        report: &mut DirectoryReport,
        tenant_id: &str,
        tenant_name: &str,
        unit: &str,
        role: Role,
        password: &str,
        full_name: Option<String>,
    ) {
        match self
            .ensure_account(tenant_id, tenant_name, unit, role, password, full_name)
            .await
        {
            Ok((account, existed)) => {
                if existed {
                    report.existing.push(account.login_id);
                } else {
                    report.created.push(account.login_id);
                }
            }
            Err(e) => {
                let login_id = derive_login_id(tenant_name, unit);
                tracing::warn!(login_id = %login_id, error = %e, "Skipping account");
                report.failed.push((login_id, e.to_string()));
            }
        }
    }

    /// Resolve or create the credential, then dual-write the profile
    /// documents. Returns the account and whether the credential already
    /// existed.
    async fn ensure_account(
        &self,
        tenant_id: &str,
        tenant_name: &str,
        unit: &str,
        role: Role,
        password: &str,
        full_name: Option<String>,
    ) -> AppResult<(Account, bool)> {
        let login_id = derive_login_id(tenant_name, unit);

        let (credential, existed) = match self.credentials.get_by_login_id(&login_id).await? {
            Some(c) => (c, true),
            None => match self.credentials.create(&login_id, password).await {
                Ok(c) => (c, false),
                // Lost a race with a concurrent run; the entry is the success.
                Err(e) if e.is_already_exists() => {
                    let c = self
                        .credentials
                        .get_by_login_id(&login_id)
                        .await?
                        .ok_or_else(|| {
                            AppError::Internal(format!(
                                "credential store reported {} exists but lookup missed",
                                login_id
                            ))
                        })?;
                    (c, true)
                }
                Err(e) => return Err(e),
            },
        };

        let account = self
            .resolve_profile(tenant_id, &credential, tenant_name, unit, role, full_name)
            .await?;
        self.write_profiles(tenant_id, &account).await?;

        tracing::info!(
            tenant_id = %tenant_id,
            login_id = %account.login_id,
            uid = %account.uid,
            role = ?account.role,
            existed = existed,
            "Account ensured"
        );
        Ok((account, existed))
    }

    /// Keep the stored profile when one exists so re-runs do not churn
    /// `createdAt`; otherwise build a fresh one.
    async fn resolve_profile(
        &self,
        tenant_id: &str,
        credential: &Credential,
        tenant_name: &str,
        unit: &str,
        role: Role,
        full_name: Option<String>,
    ) -> AppResult<Account> {
        let path = paths::tenant_account_doc(tenant_id, &credential.uid);
        if let Some(doc) = self.docs.get(&path).await? {
            if let Ok(existing) = serde_json::from_value::<Account>(doc) {
                return Ok(existing);
            }
            tracing::warn!(path = %path, "Unreadable profile document, rewriting");
        }
        Ok(Account {
            uid: credential.uid.clone(),
            login_id: credential.login_id.clone(),
            role,
            unit: unit.to_string(),
            tenant_name: tenant_name.to_string(),
            full_name,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    /// The dual write: tenant-scoped first, then the global index copy with
    /// `profileRef`. A crash in between leaves a detectable inconsistency
    /// that the next run repairs.
    async fn write_profiles(&self, tenant_id: &str, account: &Account) -> AppResult<()> {
        self.docs
            .set(
                &paths::tenant_account_doc(tenant_id, &account.uid),
                serde_json::to_value(account)?,
            )
            .await?;
        let global = GlobalAccount {
            account: account.clone(),
            profile_ref: paths::profile_ref(tenant_id, &account.uid),
        };
        self.docs
            .set(
                &paths::global_account_doc(&account.uid),
                serde_json::to_value(&global)?,
            )
            .await?;
        Ok(())
    }
}
