//! Driving port for raising an SOS alert.

use async_trait::async_trait;

use crate::domain::{AlertStatus, DeliveryTally, Error, UserId};

/// Message returned when the user has no emergency contacts.
pub const NO_CONTACTS_MESSAGE: &str =
    "SOS recorded, no emergency contacts configured for this user.";

/// Message returned when neither SMS nor email delivery is configured.
pub const NO_TRANSPORT_MESSAGE: &str =
    "SOS recorded, but no notification methods configured. Please check server configuration.";

/// Request to raise an alert on behalf of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaiseSosAlertRequest {
    /// The user raising the alert.
    pub user_id: UserId,
}

/// Result of an SOS activation that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaiseSosAlertResponse {
    /// The user has no contacts; nothing was sent or recorded.
    NoContacts,
    /// Notifications were attempted and the outcome was recorded.
    Dispatched {
        /// Status derived from the tally.
        status: AlertStatus,
        /// Per-channel counters.
        tally: DeliveryTally,
        /// Human-readable summary.
        summary: String,
    },
}

impl RaiseSosAlertResponse {
    /// Message to show the caller.
    pub fn message(&self) -> &str {
        match self {
            Self::NoContacts => NO_CONTACTS_MESSAGE,
            Self::Dispatched { summary, .. } => summary.as_str(),
        }
    }
}

/// Driving port for SOS activation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SosAlertCommand: Send + Sync {
    /// Notify the user's contacts and record the aggregated outcome.
    ///
    /// Individual delivery failures are part of the successful response.
    /// Only missing transport configuration, unknown users and lookup
    /// failures are returned as `Err`.
    async fn raise_alert(&self, request: RaiseSosAlertRequest)
    -> Result<RaiseSosAlertResponse, Error>;
}

/// Fixture command that behaves like a user without contacts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSosAlertCommand;

#[async_trait]
impl SosAlertCommand for FixtureSosAlertCommand {
    async fn raise_alert(
        &self,
        _request: RaiseSosAlertRequest,
    ) -> Result<RaiseSosAlertResponse, Error> {
        Ok(RaiseSosAlertResponse::NoContacts)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_no_contacts() {
        let response = FixtureSosAlertCommand
            .raise_alert(RaiseSosAlertRequest {
                user_id: UserId::random(),
            })
            .await
            .expect("fixture succeeds");
        assert_eq!(response.message(), NO_CONTACTS_MESSAGE);
    }
}
