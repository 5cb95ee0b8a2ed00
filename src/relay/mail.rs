//! Notification mail built from a sanitized booking request

use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{Address, Message};
use uuid::Uuid;

use super::payload::Sanitized;

/// A plain-text notification ready for a [`MailTransport`](super::transport::MailTransport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub to: Mailbox,
    pub from: Mailbox,
    /// Only set when the requester gave a usable address
    pub reply_to: Option<Mailbox>,
    pub subject: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub message_id: Uuid,
}

impl OutboundMail {
    /// Build the appointment notification for `recipient`.
    ///
    /// `From` carries the requester's name and address. When the address does
    /// not parse, the relay's own `sender` address is used instead and no
    /// `Reply-To` is set, so the notification still goes out.
    pub fn compose(recipient: &Mailbox, sender: &Mailbox, payload: &Sanitized) -> Self {
        let name = Some(payload.name.clone()).filter(|n| !n.is_empty());
        let body = format!(
            "You have received a new appointment request:\n\
             \n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Date: {}\n\
             Time: {}\n\
             Service: {}\n\
             \n\
             Message:\n\
             {}\n",
            payload.name,
            payload.email,
            payload.phone,
            payload.date,
            payload.time,
            payload.service,
            payload.message,
        );

        let (from, reply_to) = match payload.email.parse::<Address>() {
            Ok(address) => (
                Mailbox::new(name, address.clone()),
                Some(Mailbox::new(None, address)),
            ),
            Err(err) => {
                tracing::debug!(email = %payload.email, "requester address unusable: {err}");
                (
                    Mailbox::new(name.or_else(|| sender.name.clone()), sender.email.clone()),
                    None,
                )
            }
        };

        Self {
            to: recipient.clone(),
            from,
            reply_to,
            subject: format!("New Appointment Request from {}", payload.name),
            body,
            date: Utc::now(),
            message_id: Uuid::new_v4(),
        }
    }

    /// Encode the notification as an RFC 5322 message
    pub fn to_message(&self) -> Result<Message, lettre::error::Error> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.clone())
            .date(self.date.into())
            .message_id(Some(format!("<{}@booking-desk>", self.message_id)))
            .header(ContentType::TEXT_PLAIN);
        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(reply_to.clone());
        }
        builder.body(self.body.clone())
    }
}
