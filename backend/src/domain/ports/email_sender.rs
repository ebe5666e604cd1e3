//! Port for delivering SOS emails.

use async_trait::async_trait;

use crate::domain::{DeliveryReceipt, EmailAddress};

use super::define_port_error;

define_port_error! {
    /// Errors raised by email transport adapters.
    pub enum EmailSenderError {
        /// The relay did not answer within the configured timeout.
        Timeout { message: String } => "email relay timed out: {message}",
        /// The relay refused the message permanently.
        Rejected { message: String } => "email relay rejected message: {message}",
        /// The message could not be handed to the relay.
        Transport { message: String } => "email transport failed: {message}",
        /// The message could not be built from the supplied parts.
        Build { message: String } => "email message invalid: {message}",
    }
}

/// Outbound HTML email. The sender address is adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Port for email delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send one message and return the provider reference.
    async fn send_email(&self, message: &EmailMessage) -> Result<DeliveryReceipt, EmailSenderError>;
}

/// Fixture sender that accepts every message without network access.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmailSender;

#[async_trait]
impl EmailSender for FixtureEmailSender {
    async fn send_email(&self, _message: &EmailMessage) -> Result<DeliveryReceipt, EmailSenderError> {
        Ok(DeliveryReceipt::new("<fixture@allergysafety>"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_messages() {
        let message = EmailMessage {
            to: EmailAddress::new("sam@example.com").expect("valid email"),
            subject: "subject".to_owned(),
            html_body: "<p>body</p>".to_owned(),
        };
        let receipt = FixtureEmailSender
            .send_email(&message)
            .await
            .expect("fixture send succeeds");
        assert_eq!(receipt.provider_ref, "<fixture@allergysafety>");
    }
}
