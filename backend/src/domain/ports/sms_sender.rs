//! Port for delivering SOS text messages.

use async_trait::async_trait;

use crate::domain::{DeliveryReceipt, PhoneNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised by SMS transport adapters.
    pub enum SmsSenderError {
        /// The provider did not answer within the configured timeout.
        Timeout { message: String } => "sms provider timed out: {message}",
        /// The provider refused the message, for example an invalid recipient.
        Rejected { message: String } => "sms provider rejected message: {message}",
        /// The request could not be delivered to the provider.
        Transport { message: String } => "sms transport failed: {message}",
        /// The provider answered with a payload we could not decode.
        Decode { message: String } => "sms provider response invalid: {message}",
    }
}

/// Outbound text message. The sender number is adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// Recipient.
    pub to: PhoneNumber,
    /// Plain-text body.
    pub body: String,
}

/// Port for SMS delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send one message and return the provider reference.
    async fn send_sms(&self, message: &SmsMessage) -> Result<DeliveryReceipt, SmsSenderError>;
}

/// Fixture sender that accepts every message without network access.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSmsSender;

#[async_trait]
impl SmsSender for FixtureSmsSender {
    async fn send_sms(&self, _message: &SmsMessage) -> Result<DeliveryReceipt, SmsSenderError> {
        Ok(DeliveryReceipt::new("SM00000000000000000000000000000000"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_messages() {
        let message = SmsMessage {
            to: PhoneNumber::new("+15550100199").expect("valid phone"),
            body: "hello".to_owned(),
        };
        let receipt = FixtureSmsSender
            .send_sms(&message)
            .await
            .expect("fixture send succeeds");
        assert!(receipt.provider_ref.starts_with("SM"));
    }

    #[rstest]
    fn rejected_error_formats_message() {
        let err = SmsSenderError::rejected("21211: invalid 'To' number");
        assert_eq!(
            err.to_string(),
            "sms provider rejected message: 21211: invalid 'To' number"
        );
    }
}
