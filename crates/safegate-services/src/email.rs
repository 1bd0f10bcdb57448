//! Email transport for out-of-band notices via SMTP.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

use safegate_core::{AppError, AppResult, Config};

/// A single outbound message. `from` is fixed per transport instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> AppResult<()>;
}

/// SMTP mailer. No-op construction if SMTP is not configured.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl SmtpMailer {
    /// Create a mailer from config. Returns `None` if SMTP host or sender
    /// address are not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port().unwrap_or(587);

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "SMTP mailer initialized (STARTTLS)");
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "SMTP mailer initialized");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }
}

#[async_trait]
impl EmailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> AppResult<()> {
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| AppError::Transport(format!("invalid SMTP_FROM: {}", e)))?;
        let to_addr: Mailbox = email
            .to
            .parse()
            .map_err(|e| AppError::Transport(format!("invalid recipient: {}", e)))?;

        let message = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| AppError::Transport(e.to_string()))?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        tracing::info!(to = %email.to, "Email sent");
        Ok(())
    }
}
