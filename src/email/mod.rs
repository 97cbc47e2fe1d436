//! Email Module
//!
//! Outbound mail is an external collaborator: this crate only decides
//! *that* a message must go out and hands it to a [`Mailer`]. Delivery is
//! fire-and-forget by contract; a failing transport must never roll back
//! the token issuance that triggered the mail, so `send` does not return a
//! `Result` and implementations deal with failures themselves (typically by
//! logging and moving on).
//!
//! Two implementations ship with the crate:
//!
//! - [`LogMailer`] - writes the mail to the log; the stand-in transport for
//!   the standalone dev server
//! - [`MemoryMailer`] - captures mail in memory so tests (and anything else
//!   driving the services directly) can read the token back out

use async_trait::async_trait;
use tokio::sync::Mutex;

/// Which lifecycle mail this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailKind {
    /// Carries an account activation token
    Activation,
    /// Carries a password reset token
    PasswordReset,
}

/// A message handed to the outbound mail interface
///
/// The crate does not render mail bodies; the external delivery engine owns
/// templating. What crosses the boundary is the recipient, the kind, and
/// the token the mail must carry.
#[derive(Debug, Clone)]
pub struct OutboundMail {
    /// Recipient address
    pub to: String,
    /// Which lifecycle mail this is
    pub kind: MailKind,
    /// The opaque token the mail delivers
    pub token: String,
}

/// Outbound mail interface
///
/// Implementations must hand the message off quickly (queue it, log it);
/// the auth flows await `send` but never wait on actual delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Dispatch one message; infallible from the caller's point of view
    async fn send(&self, mail: OutboundMail);
}

/// Mailer that writes messages to the log
///
/// Development stand-in for the external delivery engine: the logged token
/// is the "delivered" mail. Not for production use.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutboundMail) {
        match mail.kind {
            MailKind::Activation => {
                tracing::info!("activation mail for {}: token {}", mail.to, mail.token);
            }
            MailKind::PasswordReset => {
                tracing::info!("password reset mail for {}: token {}", mail.to, mail.token);
            }
        }
    }
}

/// Mailer that captures messages in memory
///
/// Test suites read the captured mail back to drive activation and reset
/// flows end to end without a delivery engine.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<OutboundMail>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far, oldest first
    pub async fn sent(&self) -> Vec<OutboundMail> {
        self.sent.lock().await.clone()
    }

    /// The most recent token mailed to `to` with the given kind, if any
    pub async fn last_token_for(&self, to: &str, kind: MailKind) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|mail| mail.to == to && mail.kind == kind)
            .map(|mail| mail.token.clone())
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, mail: OutboundMail) {
        self.sent.lock().await.push(mail);
    }
}
