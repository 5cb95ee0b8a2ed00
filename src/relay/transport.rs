//! Outbound mail transports

use std::path::PathBuf;

use async_trait::async_trait;
use lettre::transport::sendmail::Error as SendmailError;
use lettre::{AsyncSendmailTransport, AsyncTransport, Tokio1Executor};
use thiserror::Error;

use super::mail::OutboundMail;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not encode message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("{program} did not accept the message: {source}")]
    Sendmail {
        program: String,
        #[source]
        source: SendmailError,
    },
}

/// Trait for the mail hand-off, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand one message to the mail system. `Ok` means it was accepted for delivery.
    async fn send(&self, mail: &OutboundMail) -> Result<(), TransportError>;
}

/// Hands messages to the local sendmail binary
pub struct SendmailTransport {
    program: PathBuf,
    inner: AsyncSendmailTransport<Tokio1Executor>,
}

impl SendmailTransport {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        Self {
            inner: AsyncSendmailTransport::new_with_command(program.clone()),
            program,
        }
    }
}

#[async_trait]
impl MailTransport for SendmailTransport {
    async fn send(&self, mail: &OutboundMail) -> Result<(), TransportError> {
        let message = mail.to_message()?;
        self.inner
            .send(message)
            .await
            .map_err(|source| TransportError::Sendmail {
                program: self.program.display().to_string(),
                source,
            })
    }
}

/// Logs messages instead of delivering them, for local development
#[derive(Debug, Clone, Default)]
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, mail: &OutboundMail) -> Result<(), TransportError> {
        let reply_to = mail.reply_to.as_ref().map(ToString::to_string);
        tracing::info!(
            to = %mail.to,
            from = %mail.from,
            reply_to = ?reply_to,
            subject = %mail.subject,
            "mail not delivered (log transport)\n{}",
            mail.body
        );
        Ok(())
    }
}
