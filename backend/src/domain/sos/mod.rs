//! SOS alert domain service.
//!
//! An activation moves through a fixed sequence: check that a transport is
//! configured, load the user and contacts, fan notifications out
//! concurrently, reduce the settled outcomes into a [`DeliveryTally`], then
//! append one [`AlertRecord`](crate::domain::AlertRecord). Recording happens
//! after the summary is known and its failure never changes the response.

mod dispatch;
mod tally;
mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

pub use dispatch::{DispatchError, NotificationDispatcher};
pub use tally::DeliveryTally;

use crate::domain::ports::{
    AlertRecordRepository, AlertRecordRepositoryError, ListSosHistoryRequest,
    ListSosHistoryResponse, NO_TRANSPORT_MESSAGE, RaiseSosAlertRequest, RaiseSosAlertResponse,
    SosAlertCommand, SosHistoryQuery, SosSubjectRepository, SosSubjectRepositoryError,
};
use crate::domain::{AlertRecord, Error};

fn map_subject_error(error: SosSubjectRepositoryError) -> Error {
    match error {
        SosSubjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("contact lookup unavailable: {message}"))
        }
        SosSubjectRepositoryError::Query { message } => {
            Error::internal(format!("contact lookup failed: {message}"))
        }
    }
}

fn map_record_error(error: AlertRecordRepositoryError) -> Error {
    match error {
        AlertRecordRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("alert history unavailable: {message}"))
        }
        AlertRecordRepositoryError::Query { message } => {
            Error::internal(format!("alert history error: {message}"))
        }
    }
}

/// SOS service implementing the activation command and history query.
#[derive(Clone)]
pub struct SosAlertService<S, R> {
    subjects: Arc<S>,
    records: Arc<R>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
}

impl<S, R> SosAlertService<S, R> {
    /// Create a service over the given repositories, dispatcher and clock.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use allergysafety_backend::domain::NotificationDispatcher;
    /// use allergysafety_backend::domain::SosAlertService;
    /// use allergysafety_backend::domain::ports::{
    ///     FixtureAlertRecordRepository, FixtureSmsSender, FixtureSosSubjectRepository,
    /// };
    /// use mockable::DefaultClock;
    ///
    /// let dispatcher = NotificationDispatcher::new(Some(Arc::new(FixtureSmsSender)), None);
    /// let _service = SosAlertService::new(
    ///     Arc::new(FixtureSosSubjectRepository),
    ///     Arc::new(FixtureAlertRecordRepository),
    ///     dispatcher,
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(
        subjects: Arc<S>,
        records: Arc<R>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subjects,
            records,
            dispatcher,
            clock,
        }
    }
}

#[async_trait]
impl<S, R> SosAlertCommand for SosAlertService<S, R>
where
    S: SosSubjectRepository,
    R: AlertRecordRepository,
{
    async fn raise_alert(
        &self,
        request: RaiseSosAlertRequest,
    ) -> Result<RaiseSosAlertResponse, Error> {
        if self.dispatcher.ensure_transport().is_err() {
            error!(user_id = %request.user_id, "sos raised with no notification transport configured");
            return Err(Error::notification_unavailable(NO_TRANSPORT_MESSAGE));
        }

        let subject = self
            .subjects
            .find_subject(&request.user_id)
            .await
            .map_err(map_subject_error)?
            .ok_or_else(|| Error::not_found("User not found."))?;

        let outcomes = match self.dispatcher.dispatch(&subject.user, &subject.contacts).await {
            Ok(outcomes) => outcomes,
            Err(DispatchError::NoContactsConfigured) => {
                info!(user_id = %request.user_id, "sos raised but user has no emergency contacts");
                return Ok(RaiseSosAlertResponse::NoContacts);
            }
            Err(DispatchError::NoTransportConfigured) => {
                return Err(Error::notification_unavailable(NO_TRANSPORT_MESSAGE));
            }
        };

        let tally = DeliveryTally::from_outcomes(&outcomes);
        let status = tally.status();
        let summary = tally.summary();

        let record = AlertRecord::new(request.user_id.clone(), self.clock.utc(), status);
        match self.records.append(&record).await {
            Ok(()) => info!(
                user_id = %request.user_id,
                alert_id = %record.id(),
                %status,
                "sos alert recorded"
            ),
            // Notifications already went out; the caller still gets the summary.
            Err(err) => error!(
                user_id = %request.user_id,
                alert_id = %record.id(),
                %status,
                error = %err,
                "failed to record sos alert"
            ),
        }

        if tally.successes() == 0 && tally.failures() == 0 {
            warn!(user_id = %request.user_id, "sos alert reached no contact on any channel");
        }

        Ok(RaiseSosAlertResponse::Dispatched {
            status,
            tally,
            summary,
        })
    }
}

#[async_trait]
impl<S, R> SosHistoryQuery for SosAlertService<S, R>
where
    S: SosSubjectRepository,
    R: AlertRecordRepository,
{
    async fn list_history(
        &self,
        request: ListSosHistoryRequest,
    ) -> Result<ListSosHistoryResponse, Error> {
        let history = self
            .records
            .list_for_user(&request.user_id)
            .await
            .map_err(map_record_error)?;
        Ok(ListSosHistoryResponse { history })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
