//! HTTP endpoint that turns posted booking forms into notification mail

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::Method;
use axum::routing::{any, get};
use axum::Router;
use lettre::message::Mailbox;
use tracing::{error, info};

use super::mail::OutboundMail;
use super::outcome::RelayOutcome;
use super::payload::SubmissionPayload;
use super::transport::{LogTransport, MailTransport, SendmailTransport};
use crate::config::{BookingConfig, TransportKind};

/// Path the booking form posts to
pub const RELAY_PATH: &str = "/send_mail";

/// Shared, read-only relay state
#[derive(Clone)]
pub struct RelayState {
    recipient: Arc<Mailbox>,
    sender: Arc<Mailbox>,
    transport: Arc<dyn MailTransport>,
}

impl RelayState {
    pub fn new(recipient: Mailbox, sender: Mailbox, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            recipient: Arc::new(recipient),
            sender: Arc::new(sender),
            transport,
        }
    }

    /// Parse the configured mailboxes and build the selected transport
    pub fn from_config(config: &BookingConfig) -> Result<Self> {
        let recipient: Mailbox = config
            .recipient
            .parse()
            .with_context(|| format!("invalid recipient {:?}", config.recipient))?;
        let sender: Mailbox = config
            .sender
            .parse()
            .with_context(|| format!("invalid sender {:?}", config.sender))?;
        let transport: Arc<dyn MailTransport> = match config.transport {
            TransportKind::Sendmail => Arc::new(SendmailTransport::new(&config.sendmail_path)),
            TransportKind::Log => Arc::new(LogTransport),
        };
        Ok(Self::new(recipient, sender, transport))
    }

    /// Sanitize, compose and hand off one booking request
    pub async fn dispatch(&self, payload: &SubmissionPayload) -> RelayOutcome {
        let mail = OutboundMail::compose(&self.recipient, &self.sender, &payload.sanitize());
        match self.transport.send(&mail).await {
            Ok(()) => {
                info!(message_id = %mail.message_id, "booking request relayed");
                RelayOutcome::Success
            }
            Err(err) => {
                error!(message_id = %mail.message_id, "booking request not relayed: {err}");
                RelayOutcome::TransportError
            }
        }
    }
}

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route(RELAY_PATH, any(relay).layer(DefaultBodyLimit::disable()))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

async fn relay(State(state): State<RelayState>, method: Method, body: Bytes) -> RelayOutcome {
    if method != Method::POST {
        tracing::debug!(%method, "relay called without POST");
        return RelayOutcome::InvalidMethod;
    }
    let payload = SubmissionPayload::from_form_body(&body);
    state.dispatch(&payload).await
}

/// Run the relay until Ctrl+C
pub async fn serve(config: &BookingConfig) -> Result<()> {
    let addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.bind))?;
    let app = router(RelayState::from_config(config)?);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        recipient = %config.recipient,
        transport = ?config.transport,
        "relay listening on http://{addr}{RELAY_PATH}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl+C: {err}");
        std::future::pending::<()>().await;
    }
    info!("relay shutting down");
}
