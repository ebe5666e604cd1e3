//! Per-task notification outcomes produced by the SOS fanout.

use std::fmt;

use serde::Serialize;

use super::ContactName;

/// Delivery channel for a single notification task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    /// Text message via the SMS provider.
    Sms,
    /// Email via the mail relay.
    Email,
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sms => "sms",
            Self::Email => "email",
        })
    }
}

/// Why a task resolved without calling a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The contact has no value for the channel's recipient field.
    MissingContactField,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContactField => f.write_str("missing contact field"),
        }
    }
}

/// Settled result of one notification task.
///
/// Every task settles to exactly one outcome; transport errors are captured
/// in [`NotificationOutcome::Failed`] rather than propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The transport accepted the message.
    Sent {
        /// Channel used.
        channel: NotificationChannel,
        /// Contact notified.
        contact: ContactName,
        /// Recipient phone number or address.
        target: String,
        /// Provider message reference.
        provider_ref: String,
    },
    /// The contact lacks the channel's recipient field; no call was made.
    Skipped {
        /// Channel skipped.
        channel: NotificationChannel,
        /// Contact skipped.
        contact: ContactName,
        /// Always [`SkipReason::MissingContactField`].
        reason: SkipReason,
    },
    /// The transport rejected the message or the call failed.
    Failed {
        /// Channel used.
        channel: NotificationChannel,
        /// Contact targeted.
        contact: ContactName,
        /// Recipient phone number or address.
        target: String,
        /// Transport error description.
        error: String,
    },
}

impl NotificationOutcome {
    /// Channel the outcome belongs to.
    pub fn channel(&self) -> NotificationChannel {
        match self {
            Self::Sent { channel, .. }
            | Self::Skipped { channel, .. }
            | Self::Failed { channel, .. } => *channel,
        }
    }
}

/// Acknowledgement returned by a transport that accepted a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider-assigned message reference (Twilio SID, SMTP message id).
    pub provider_ref: String,
}

impl DeliveryReceipt {
    /// Wrap a provider reference.
    pub fn new(provider_ref: impl Into<String>) -> Self {
        Self {
            provider_ref: provider_ref.into(),
        }
    }
}
