//! Port for the append-only SOS alert history.

use async_trait::async_trait;

use crate::domain::{AlertRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by alert record repository adapters.
    pub enum AlertRecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "alert record repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } =>
            "alert record repository query failed: {message}",
    }
}

/// Port for appending and listing alert records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertRecordRepository: Send + Sync {
    /// Persist a new record.
    async fn append(&self, record: &AlertRecord) -> Result<(), AlertRecordRepositoryError>;

    /// List a user's records, newest first.
    ///
    /// Ties on timestamp are broken by descending id so repeated reads are
    /// stable.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AlertRecord>, AlertRecordRepositoryError>;
}

/// Fixture repository that discards writes and lists nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertRecordRepository;

#[async_trait]
impl AlertRecordRepository for FixtureAlertRecordRepository {
    async fn append(&self, _record: &AlertRecord) -> Result<(), AlertRecordRepositoryError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<AlertRecord>, AlertRecordRepositoryError> {
        Ok(Vec::new())
    }
}
