//! Reqwest-backed Twilio SMS sender.
//!
//! This adapter owns transport details only: form encoding, basic auth,
//! timeout and HTTP error mapping, and decoding the message SID.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{TwilioErrorDto, TwilioMessageDto};
use crate::domain::DeliveryReceipt;
use crate::domain::ports::{SmsMessage, SmsSender, SmsSenderError};
use crate::outbound::transport_config::TwilioSettings;

/// Errors raised while constructing the sender.
#[derive(Debug, thiserror::Error)]
pub enum TwilioSetupError {
    /// The HTTP client could not be built.
    #[error("failed to build Twilio HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The messages endpoint could not be derived from the base URL.
    #[error("invalid Twilio messages URL: {0}")]
    Url(#[from] url::ParseError),
}

/// SMS sender posting to `{base}/2010-04-01/Accounts/{sid}/Messages.json`.
pub struct TwilioSmsSender {
    client: Client,
    messages_url: Url,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioSmsSender {
    /// Build a sender whose client enforces `timeout` on every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// base URL cannot be extended with the messages path.
    pub fn new(settings: &TwilioSettings, timeout: Duration) -> Result<Self, TwilioSetupError> {
        let client = Client::builder().timeout(timeout).build()?;
        let messages_url = messages_url(&settings.base_url, &settings.account_sid)?;
        Ok(Self {
            client,
            messages_url,
            account_sid: settings.account_sid.clone(),
            auth_token: settings.auth_token.clone(),
            from_number: settings.from_number.clone(),
        })
    }
}

fn messages_url(base: &Url, account_sid: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("2010-04-01/Accounts/{account_sid}/Messages.json"))
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send_sms(&self, message: &SmsMessage) -> Result<DeliveryReceipt, SmsSenderError> {
        let response = self
            .client
            .post(self.messages_url.clone())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("To", message.to.as_str()),
                ("From", self.from_number.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: TwilioMessageDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            SmsSenderError::decode(format!("invalid Twilio message payload: {error}"))
        })?;
        Ok(DeliveryReceipt::new(decoded.sid))
    }
}

fn map_transport_error(error: reqwest::Error) -> SmsSenderError {
    if error.is_timeout() {
        SmsSenderError::timeout(error.to_string())
    } else {
        SmsSenderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SmsSenderError {
    let detail = serde_json::from_slice::<TwilioErrorDto>(body)
        .ok()
        .and_then(|dto| dto.describe())
        .unwrap_or_else(|| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SmsSenderError::timeout(message)
        }
        _ if status.is_client_error() => SmsSenderError::rejected(message),
        _ => SmsSenderError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://api.twilio.com")]
    #[case("https://api.twilio.com/")]
    #[case("http://127.0.0.1:4010/twilio")]
    fn messages_url_appends_account_path(#[case] base: &str) {
        let base = Url::parse(base).expect("valid base");
        let url = messages_url(&base, "AC123").expect("url joins");
        assert!(
            url.as_str()
                .ends_with("/2010-04-01/Accounts/AC123/Messages.json"),
            "unexpected url {url}"
        );
        assert!(url.as_str().starts_with(base.as_str().trim_end_matches('/')));
    }

    #[rstest]
    fn client_errors_are_rejections_with_provider_detail() {
        let error = map_status_error(
            StatusCode::BAD_REQUEST,
            br#"{"code":21211,"message":"The 'To' number is not a valid phone number.","status":400}"#,
        );
        assert_eq!(
            error,
            SmsSenderError::rejected(
                "status 400: 21211: The 'To' number is not a valid phone number."
            )
        );
    }

    #[rstest]
    #[case(StatusCode::GATEWAY_TIMEOUT)]
    #[case(StatusCode::REQUEST_TIMEOUT)]
    fn timeout_statuses_map_to_timeout(#[case] status: StatusCode) {
        assert!(matches!(
            map_status_error(status, b""),
            SmsSenderError::Timeout { .. }
        ));
    }

    #[rstest]
    fn server_errors_fall_back_to_body_preview() {
        let body = "x".repeat(200);
        let error = map_status_error(StatusCode::BAD_GATEWAY, body.as_bytes());
        match error {
            SmsSenderError::Transport { message } => {
                assert!(message.starts_with("status 502: "));
                assert!(message.ends_with("..."));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
