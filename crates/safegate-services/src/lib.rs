//! SafeGate services.
//!
//! The three core subsystems — identity directory, alert dispatch, and the
//! password recovery workflow — plus the push/email transport seams and the
//! event-handler adapters that wire dispatch and recovery into the document
//! event router.

pub mod directory;
pub mod dispatch;
pub mod email;
pub mod handlers;
pub mod push;
pub mod recovery;

pub use directory::{DirectoryReport, IdentityDirectory, OnboardingRequest, SyncEntry};
pub use dispatch::AlertDispatcher;
pub use email::{EmailTransport, OutboundEmail, SmtpMailer};
pub use handlers::{register_handlers, ALERT_PATTERN, PASSWORD_RESET_PATTERN};
pub use push::{HttpPushClient, PushMessage, PushTransport};
pub use recovery::RecoveryService;
