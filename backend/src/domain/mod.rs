//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP adapter
//! and persistence layers, plus the SOS activation service that drives the
//! outbound transports through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - SosUser, EmergencyContact: the alert subject and its recipients.
//! - AlertRecord, AlertStatus: persisted activation outcome.
//! - SosAlertService: activation command and history query.

pub mod ports;

mod alert;
mod contact;
mod error;
mod notification;
mod sos;
mod trace_id;
mod user;

pub use self::alert::{AlertRecord, AlertStatus, UnknownAlertStatus};
pub use self::contact::{
    ContactName, ContactValidationError, EmailAddress, EmergencyContact, PhoneNumber,
    Relationship,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::notification::{
    DeliveryReceipt, NotificationChannel, NotificationOutcome, SkipReason,
};
pub use self::sos::{DeliveryTally, DispatchError, NotificationDispatcher, SosAlertService};
pub use self::trace_id::TraceId;
pub use self::user::{FullName, SosUser, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use allergysafety_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("User not found."))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
