pub mod account;
pub mod alert;
pub mod password_reset;
pub mod tenant;

pub use account::{Account, GlobalAccount, Role};
pub use alert::{AlertKind, AlertRecord, AlertStatus};
pub use password_reset::{PasswordResetRequest, ResetStatus};
pub use tenant::{Tenant, TenantSettings};
