//! Builders for transport clients and the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{error, info};

use allergysafety_backend::domain::ports::{
    AlertRecordRepository, EmailSender, FixtureAlertRecordRepository, FixtureSosSubjectRepository,
    SmsSender, SosAlertCommand, SosHistoryQuery, SosSubjectRepository,
};
use allergysafety_backend::domain::{NotificationDispatcher, SosAlertService};
use allergysafety_backend::inbound::http::state::HttpState;
use allergysafety_backend::outbound::persistence::{
    DieselAlertRecordRepository, DieselSosSubjectRepository,
};
use allergysafety_backend::outbound::smtp::SmtpEmailSender;
use allergysafety_backend::outbound::transport_config::TransportSettings;
use allergysafety_backend::outbound::twilio::TwilioSmsSender;

use super::ServerConfig;

/// Construct the configured transport clients.
///
/// A client that fails to build is logged and left out, so the remaining
/// channel still works.
pub(crate) fn build_transports(
    settings: &TransportSettings,
) -> (Option<Arc<dyn SmsSender>>, Option<Arc<dyn EmailSender>>) {
    let sms = settings.twilio.as_ref().and_then(|twilio| {
        match TwilioSmsSender::new(twilio, settings.timeout) {
            Ok(sender) => {
                info!("SMS notifications enabled");
                Some(Arc::new(sender) as Arc<dyn SmsSender>)
            }
            Err(err) => {
                error!(error = %err, "Twilio sender setup failed; SMS notifications disabled");
                None
            }
        }
    });
    let email = settings.smtp.as_ref().and_then(|smtp| {
        match SmtpEmailSender::new(smtp, settings.timeout) {
            Ok(sender) => {
                info!(service = smtp.service.as_str(), "email notifications enabled");
                Some(Arc::new(sender) as Arc<dyn EmailSender>)
            }
            Err(err) => {
                error!(error = %err, "SMTP sender setup failed; email notifications disabled");
                None
            }
        }
    });
    (sms, email)
}

fn sos_ports<S, R>(
    subjects: Arc<S>,
    records: Arc<R>,
    dispatcher: NotificationDispatcher,
) -> (Arc<dyn SosAlertCommand>, Arc<dyn SosHistoryQuery>)
where
    S: SosSubjectRepository + 'static,
    R: AlertRecordRepository + 'static,
{
    let service = Arc::new(SosAlertService::new(
        subjects,
        records,
        dispatcher,
        Arc::new(DefaultClock),
    ));
    (
        service.clone() as Arc<dyn SosAlertCommand>,
        service as Arc<dyn SosHistoryQuery>,
    )
}

/// Build HTTP state using Diesel repositories when a pool is available,
/// otherwise fixture repositories.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let dispatcher = NotificationDispatcher::new(config.sms.clone(), config.email.clone());
    let (sos, sos_history) = match &config.db_pool {
        Some(pool) => sos_ports(
            Arc::new(DieselSosSubjectRepository::new(pool.clone())),
            Arc::new(DieselAlertRecordRepository::new(pool.clone())),
            dispatcher,
        ),
        None => sos_ports(
            Arc::new(FixtureSosSubjectRepository),
            Arc::new(FixtureAlertRecordRepository),
            dispatcher,
        ),
    };
    web::Data::new(HttpState::new(sos, sos_history))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::cookie::{Key, SameSite};
    use allergysafety_backend::domain::UserId;
    use allergysafety_backend::domain::ports::{RaiseSosAlertRequest, RaiseSosAlertResponse};
    use allergysafety_backend::outbound::transport_config::{SmtpSettings, TwilioSettings};
    use rstest::rstest;

    use super::*;

    fn config() -> ServerConfig {
        ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            "127.0.0.1:0".parse().expect("valid addr"),
        )
    }

    #[rstest]
    fn no_settings_yield_no_transports() {
        let (sms, email) = build_transports(&TransportSettings {
            twilio: None,
            smtp: None,
            timeout: Duration::from_secs(10),
        });
        assert!(sms.is_none());
        assert!(email.is_none());
    }

    #[rstest]
    fn invalid_sender_disables_only_email() {
        let settings = TransportSettings {
            twilio: Some(TwilioSettings {
                account_sid: "AC123".to_owned(),
                auth_token: "secret".to_owned(),
                from_number: "+15550100000".to_owned(),
                base_url: "https://api.twilio.com/".parse().expect("valid url"),
            }),
            smtp: Some(SmtpSettings {
                service: "gmail".to_owned(),
                username: "alerts".to_owned(),
                password: "app-password".to_owned(),
                from: "not a mailbox".to_owned(),
            }),
            timeout: Duration::from_secs(5),
        };
        let (sms, email) = build_transports(&settings);
        assert!(sms.is_some());
        assert!(email.is_none());
    }

    #[rstest]
    #[actix_rt::test]
    async fn fixture_state_reports_no_transport() {
        let state = build_http_state(&config());
        let result = state
            .sos
            .raise_alert(RaiseSosAlertRequest {
                user_id: UserId::random(),
            })
            .await;
        let error = result.expect_err("no transports configured");
        assert_eq!(
            error.code(),
            allergysafety_backend::domain::ErrorCode::NotificationUnavailable
        );
    }

    #[rstest]
    #[actix_rt::test]
    async fn fixture_state_with_transport_treats_users_as_contactless() {
        let config = config().with_transports(
            Some(Arc::new(allergysafety_backend::domain::ports::FixtureSmsSender)),
            None,
        );
        let state = build_http_state(&config);
        let response = state
            .sos
            .raise_alert(RaiseSosAlertRequest {
                user_id: UserId::random(),
            })
            .await;
        assert_eq!(response, Ok(RaiseSosAlertResponse::NoContacts));
    }
}
