//! Lettre-backed SMTP email sender.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use super::services::{RelaySecurity, SmtpRelay};
use crate::domain::DeliveryReceipt;
use crate::domain::ports::{EmailMessage, EmailSender, EmailSenderError};
use crate::outbound::transport_config::SmtpSettings;

const MESSAGE_ID_DOMAIN: &str = "allergysafety";

/// Errors raised while constructing the sender.
#[derive(Debug, thiserror::Error)]
pub enum SmtpSetupError {
    /// The relay host could not be used to build a TLS transport.
    #[error("invalid SMTP relay '{host}': {source}")]
    Relay {
        host: String,
        #[source]
        source: lettre::transport::smtp::Error,
    },
    /// The configured sender is not a valid mailbox.
    #[error("invalid sender mailbox '{value}': {source}")]
    Sender {
        value: String,
        #[source]
        source: lettre::address::AddressError,
    },
}

/// Email sender delivering HTML messages through an authenticated relay.
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Build a sender whose transport enforces `timeout` on every command.
    ///
    /// # Errors
    ///
    /// Returns an error when the relay or sender mailbox is invalid.
    pub fn new(settings: &SmtpSettings, timeout: Duration) -> Result<Self, SmtpSetupError> {
        let from = parse_mailbox(&settings.from)?;
        let relay = SmtpRelay::for_service(&settings.service);
        let builder = match relay.security {
            RelaySecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&relay.host),
            RelaySecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&relay.host)
            }
        }
        .map_err(|source| SmtpSetupError::Relay {
            host: relay.host.clone(),
            source,
        })?;
        let transport = builder
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(timeout))
            .build();
        Ok(Self { transport, from })
    }
}

fn parse_mailbox(value: &str) -> Result<Mailbox, SmtpSetupError> {
    value.parse().map_err(|source| SmtpSetupError::Sender {
        value: value.to_owned(),
        source,
    })
}

fn message_id() -> String {
    format!("<{}@{MESSAGE_ID_DOMAIN}>", Uuid::new_v4())
}

fn build_message(
    from: &Mailbox,
    message: &EmailMessage,
    message_id: &str,
) -> Result<Message, EmailSenderError> {
    let to: Mailbox = message
        .to
        .as_str()
        .parse()
        .map_err(|error| EmailSenderError::build(format!("invalid recipient: {error}")))?;
    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(message.subject.as_str())
        .message_id(Some(message_id.to_owned()))
        .header(ContentType::TEXT_HTML)
        .body(message.html_body.clone())
        .map_err(|error| EmailSenderError::build(error.to_string()))
}

fn map_send_error(error: lettre::transport::smtp::Error) -> EmailSenderError {
    if error.is_timeout() {
        EmailSenderError::timeout(error.to_string())
    } else if error.is_permanent() {
        EmailSenderError::rejected(error.to_string())
    } else {
        EmailSenderError::transport(error.to_string())
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<DeliveryReceipt, EmailSenderError> {
        let message_id = message_id();
        let email = build_message(&self.from, message, &message_id)?;
        self.transport.send(email).await.map_err(map_send_error)?;
        Ok(DeliveryReceipt::new(message_id))
    }
}
