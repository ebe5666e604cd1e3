//! Driving port for reading a user's SOS history.

use async_trait::async_trait;

use crate::domain::{AlertRecord, Error, UserId};

/// Request for a user's alert history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSosHistoryRequest {
    /// The user whose history is read.
    pub user_id: UserId,
}

/// A user's alert history, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSosHistoryResponse {
    /// Records ordered by descending timestamp.
    pub history: Vec<AlertRecord>,
}

/// Driving port for alert history reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SosHistoryQuery: Send + Sync {
    /// List every recorded alert for the user.
    async fn list_history(
        &self,
        request: ListSosHistoryRequest,
    ) -> Result<ListSosHistoryResponse, Error>;
}

/// Fixture query returning an empty history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSosHistoryQuery;

#[async_trait]
impl SosHistoryQuery for FixtureSosHistoryQuery {
    async fn list_history(
        &self,
        _request: ListSosHistoryRequest,
    ) -> Result<ListSosHistoryResponse, Error> {
        Ok(ListSosHistoryResponse {
            history: Vec::new(),
        })
    }
}
