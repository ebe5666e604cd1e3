//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod alert_record_repository;
mod email_sender;
mod sms_sender;
mod sos_alert_command;
mod sos_history_query;
mod sos_subject_repository;

#[cfg(test)]
pub use alert_record_repository::MockAlertRecordRepository;
pub use alert_record_repository::{
    AlertRecordRepository, AlertRecordRepositoryError, FixtureAlertRecordRepository,
};
#[cfg(test)]
pub use email_sender::MockEmailSender;
pub use email_sender::{EmailMessage, EmailSender, EmailSenderError, FixtureEmailSender};
#[cfg(test)]
pub use sms_sender::MockSmsSender;
pub use sms_sender::{FixtureSmsSender, SmsMessage, SmsSender, SmsSenderError};
#[cfg(test)]
pub use sos_alert_command::MockSosAlertCommand;
pub use sos_alert_command::{
    FixtureSosAlertCommand, NO_CONTACTS_MESSAGE, NO_TRANSPORT_MESSAGE, RaiseSosAlertRequest,
    RaiseSosAlertResponse, SosAlertCommand,
};
#[cfg(test)]
pub use sos_history_query::MockSosHistoryQuery;
pub use sos_history_query::{
    FixtureSosHistoryQuery, ListSosHistoryRequest, ListSosHistoryResponse, SosHistoryQuery,
};
#[cfg(test)]
pub use sos_subject_repository::MockSosSubjectRepository;
pub use sos_subject_repository::{
    FixtureSosSubjectRepository, SosSubject, SosSubjectRepository, SosSubjectRepositoryError,
};
