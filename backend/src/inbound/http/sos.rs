//! SOS HTTP handlers.
//!
//! ```text
//! POST /api/v1/sos
//! GET /api/v1/sos/history
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{ListSosHistoryRequest, RaiseSosAlertRequest, RaiseSosAlertResponse};
use crate::domain::{AlertRecord, AlertStatus, DeliveryTally, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Per-channel delivery counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryCounts {
    pub sms_sent: u32,
    pub sms_failed: u32,
    pub sms_skipped: u32,
    pub email_sent: u32,
    pub email_failed: u32,
    pub email_skipped: u32,
}

impl From<DeliveryTally> for DeliveryCounts {
    fn from(tally: DeliveryTally) -> Self {
        Self {
            sms_sent: tally.sms_sent,
            sms_failed: tally.sms_failed,
            sms_skipped: tally.sms_skipped,
            email_sent: tally.email_sent,
            email_failed: tally.email_failed,
            email_skipped: tally.email_skipped,
        }
    }
}

/// Response body for `POST /api/v1/sos`.
///
/// `status` and `delivery` are omitted when the user has no contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SosActivationResponse {
    #[schema(example = "SOS alert processing complete. 1 SMS sent. 1 emails failed.")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AlertStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryCounts>,
}

impl From<RaiseSosAlertResponse> for SosActivationResponse {
    fn from(response: RaiseSosAlertResponse) -> Self {
        let message = response.message().to_owned();
        match response {
            RaiseSosAlertResponse::NoContacts => Self {
                message,
                status: None,
                delivery: None,
            },
            RaiseSosAlertResponse::Dispatched { status, tally, .. } => Self {
                message,
                status: Some(status),
                delivery: Some(tally.into()),
            },
        }
    }
}

/// One entry of the alert history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SosHistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
}

impl From<AlertRecord> for SosHistoryEntry {
    fn from(record: AlertRecord) -> Self {
        Self {
            id: record.id(),
            timestamp: record.timestamp(),
            status: record.status(),
        }
    }
}

/// Response body for `GET /api/v1/sos/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SosHistoryResponse {
    pub history: Vec<SosHistoryEntry>,
}

/// Raise an SOS alert for the authenticated user.
///
/// Every emergency contact is notified on every configured channel. Delivery
/// failures for individual contacts are reported in the summary and do not
/// fail the request.
#[utoipa::path(
    post,
    path = "/api/v1/sos",
    responses(
        (status = 200, description = "Notifications attempted", body = SosActivationResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "No notification transport configured", body = Error),
        (status = 503, description = "Contact lookup unavailable", body = Error)
    ),
    tags = ["sos"],
    operation_id = "raiseSosAlert"
)]
#[post("/sos")]
pub async fn raise_sos(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let response = state
        .sos
        .raise_alert(RaiseSosAlertRequest { user_id })
        .await?;
    Ok(HttpResponse::Ok().json(SosActivationResponse::from(response)))
}

/// List the authenticated user's SOS history, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/sos/history",
    responses(
        (status = 200, description = "Alert history", body = SosHistoryResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "History unavailable", body = Error)
    ),
    tags = ["sos"],
    operation_id = "listSosHistory"
)]
#[get("/sos/history")]
pub async fn sos_history(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SosHistoryResponse>> {
    let user_id = session.require_user_id()?;
    let response = state
        .sos_history
        .list_history(ListSosHistoryRequest { user_id })
        .await?;
    Ok(web::Json(SosHistoryResponse {
        history: response.history.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
#[path = "sos_tests.rs"]
mod tests;
