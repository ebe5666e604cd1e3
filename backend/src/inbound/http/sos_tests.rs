//! Tests for SOS HTTP handlers.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    FixtureSosHistoryQuery, ListSosHistoryResponse, MockSosAlertCommand, MockSosHistoryQuery,
    NO_CONTACTS_MESSAGE, NO_TRANSPORT_MESSAGE, SosAlertCommand, SosHistoryQuery,
};
use crate::domain::{ErrorCode, UserId};

const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn session_user() -> UserId {
    UserId::new(USER_ID).expect("fixture id")
}

fn test_app(
    sos: Arc<dyn SosAlertCommand>,
    history: Arc<dyn SosHistoryQuery>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(sos, history)))
        .wrap(crate::inbound::http::test_utils::test_session_middleware())
        .route(
            "/test-login",
            web::post().to(|session: SessionContext| async move {
                session.persist_user(&session_user())?;
                Ok::<_, Error>(HttpResponse::Ok().finish())
            }),
        )
        .service(web::scope("/api/v1").service(raise_sos).service(sos_history))
}

async fn session_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post().uri("/test-login").to_request(),
    )
    .await;
    assert!(res.status().is_success());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

fn command_returning(
    result: Result<RaiseSosAlertResponse, Error>,
) -> Arc<dyn SosAlertCommand> {
    let mut command = MockSosAlertCommand::new();
    command
        .expect_raise_alert()
        .withf(|request| request.user_id == session_user())
        .times(1)
        .return_once(move |_| result);
    Arc::new(command)
}

async fn post_sos(sos: Arc<dyn SosAlertCommand>) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(sos, Arc::new(FixtureSosHistoryQuery))).await;
    let cookie = session_cookie(&app).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/sos")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let status = res.status();
    let body: Value = actix_test::read_body_json(res).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn dispatched_alert_reports_status_and_delivery() {
    let tally = DeliveryTally {
        sms_sent: 1,
        email_failed: 1,
        ..DeliveryTally::default()
    };
    let (status, body) = post_sos(command_returning(Ok(RaiseSosAlertResponse::Dispatched {
        status: AlertStatus::Partial,
        summary: tally.summary(),
        tally,
    })))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Partial");
    assert_eq!(
        body["delivery"],
        json!({
            "smsSent": 1,
            "smsFailed": 0,
            "smsSkipped": 0,
            "emailSent": 0,
            "emailFailed": 1,
            "emailSkipped": 0,
        })
    );
    let message = body["message"].as_str().expect("message");
    assert!(message.contains("1 SMS sent"));
    assert!(message.contains("1 emails failed"));
}

#[rstest]
#[actix_web::test]
async fn no_contacts_returns_message_only() {
    let (status, body) = post_sos(command_returning(Ok(RaiseSosAlertResponse::NoContacts))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": NO_CONTACTS_MESSAGE }));
}

#[rstest]
#[actix_web::test]
async fn missing_transport_is_a_server_error() {
    let (status, body) = post_sos(command_returning(Err(Error::notification_unavailable(
        NO_TRANSPORT_MESSAGE,
    ))))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "notification_unavailable");
    assert_eq!(body["message"], NO_TRANSPORT_MESSAGE);
}

#[rstest]
#[case(Error::not_found("User not found."), StatusCode::NOT_FOUND, ErrorCode::NotFound)]
#[case(
    Error::service_unavailable("contact lookup unavailable"),
    StatusCode::SERVICE_UNAVAILABLE,
    ErrorCode::ServiceUnavailable
)]
#[actix_web::test]
async fn lookup_errors_map_to_status(
    #[case] error: Error,
    #[case] expected_status: StatusCode,
    #[case] expected_code: ErrorCode,
) {
    let (status, body) = post_sos(command_returning(Err(error))).await;

    assert_eq!(status, expected_status);
    let payload: Error = serde_json::from_value(body).expect("error payload");
    assert_eq!(payload.code(), expected_code);
}

#[rstest]
#[actix_web::test]
async fn anonymous_callers_are_rejected() {
    let mut command = MockSosAlertCommand::new();
    command.expect_raise_alert().times(0);
    let app = actix_test::init_service(test_app(
        Arc::new(command),
        Arc::new(FixtureSosHistoryQuery),
    ))
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/sos").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn history_lists_entries_in_port_order() {
    let newer = AlertRecord::new(
        session_user(),
        Utc.with_ymd_and_hms(2026, 5, 2, 8, 0, 0)
            .single()
            .expect("valid timestamp"),
        AlertStatus::Sent,
    );
    let older = AlertRecord::new(
        session_user(),
        Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp"),
        AlertStatus::Failed,
    );
    let expected_ids = [newer.id(), older.id()];
    let mut query = MockSosHistoryQuery::new();
    query
        .expect_list_history()
        .withf(|request| request.user_id == session_user())
        .times(1)
        .return_once(move |_| {
            Ok(ListSosHistoryResponse {
                history: vec![newer, older],
            })
        });

    let mut command = MockSosAlertCommand::new();
    command.expect_raise_alert().times(0);
    let app = actix_test::init_service(test_app(Arc::new(command), Arc::new(query))).await;
    let cookie = session_cookie(&app).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/sos/history")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: SosHistoryResponse = actix_test::read_body_json(res).await;
    let ids: Vec<Uuid> = body.history.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, expected_ids);
    assert_eq!(body.history[0].status, AlertStatus::Sent);
    assert_eq!(body.history[1].status, AlertStatus::Failed);
}
