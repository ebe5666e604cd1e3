//! Persisted SOS alert history.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Overall delivery status of one SOS activation.
///
/// Stored and serialised as the exact labels `Sent`, `Partial` and `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AlertStatus {
    /// No task failed. Includes activations where every task was skipped.
    Sent,
    /// At least one task succeeded and at least one failed.
    Partial,
    /// At least one task failed and none succeeded.
    Failed,
}

impl AlertStatus {
    /// Stable storage label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Partial => "Partial",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status label is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown alert status: {0}")]
pub struct UnknownAlertStatus(pub String);

impl std::str::FromStr for AlertStatus {
    type Err = UnknownAlertStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sent" => Ok(Self::Sent),
            "Partial" => Ok(Self::Partial),
            "Failed" => Ok(Self::Failed),
            other => Err(UnknownAlertStatus(other.to_owned())),
        }
    }
}

/// One history entry per SOS activation that reached aggregation.
///
/// Records are append-only; nothing in this crate updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    id: Uuid,
    user_id: UserId,
    timestamp: DateTime<Utc>,
    status: AlertStatus,
}

impl AlertRecord {
    /// Create a record with a fresh identifier.
    pub fn new(user_id: UserId, timestamp: DateTime<Utc>, status: AlertStatus) -> Self {
        Self::from_parts(Uuid::new_v4(), user_id, timestamp, status)
    }

    /// Rebuild a record from stored parts.
    pub fn from_parts(
        id: Uuid,
        user_id: UserId,
        timestamp: DateTime<Utc>,
        status: AlertStatus,
    ) -> Self {
        Self {
            id,
            user_id,
            timestamp,
            status,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owner of the alert.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Moment the record was persisted.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Derived delivery status.
    pub fn status(&self) -> AlertStatus {
        self.status
    }
}
