//! Document paths and notification topic names.
//!
//! The persisted layout:
//! - `tenants/{tenantId}`
//! - `tenants/{tenantId}/accounts/{uid}`
//! - `accounts/{uid}` (global, with `profileRef` back to the tenant-scoped doc)
//! - `tenants/{tenantId}/alerts/{alertId}`
//! - `passwordResets/{requestId}`

pub fn tenant_doc(tenant_id: &str) -> String {
    format!("tenants/{}", tenant_id)
}

pub fn tenant_account_doc(tenant_id: &str, uid: &str) -> String {
    format!("tenants/{}/accounts/{}", tenant_id, uid)
}

pub fn global_account_doc(uid: &str) -> String {
    format!("accounts/{}", uid)
}

/// Value stored in the global account document's `profileRef` field.
pub fn profile_ref(tenant_id: &str, uid: &str) -> String {
    format!("/tenants/{}/accounts/{}", tenant_id, uid)
}

pub fn alert_doc(tenant_id: &str, alert_id: &str) -> String {
    format!("tenants/{}/alerts/{}", tenant_id, alert_id)
}

pub fn password_reset_doc(request_id: &str) -> String {
    format!("passwordResets/{}", request_id)
}

/// Topic that reaches the security staff of a tenant.
pub fn guards_topic(tenant_id: &str) -> String {
    format!("guards_{}", tenant_id)
}

/// Topic that reaches the residents of a tenant.
pub fn residents_topic(tenant_id: &str) -> String {
    format!("residents_{}", tenant_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_ref_points_at_tenant_scoped_doc() {
        assert_eq!(
            profile_ref("greenvalleyapartments", "u-1"),
            format!("/{}", tenant_account_doc("greenvalleyapartments", "u-1"))
        );
    }

    #[test]
    fn topics_are_scoped_by_tenant_id() {
        assert_eq!(guards_topic("demo"), "guards_demo");
        assert_eq!(residents_topic("demo"), "residents_demo");
    }
}
