//! Notification transport settings read from the environment.
//!
//! Each channel is enabled only when all of its variables are present. A
//! partially configured channel is disabled with a warning; having no channel
//! at all is not a startup error.

use std::fmt;
use std::time::Duration;

use mockable::Env;
use tracing::warn;
use url::Url;

pub(crate) const TWILIO_ACCOUNT_SID_ENV: &str = "TWILIO_ACCOUNT_SID";
pub(crate) const TWILIO_AUTH_TOKEN_ENV: &str = "TWILIO_AUTH_TOKEN";
pub(crate) const TWILIO_PHONE_NUMBER_ENV: &str = "TWILIO_PHONE_NUMBER";
pub(crate) const TWILIO_API_BASE_URL_ENV: &str = "TWILIO_API_BASE_URL";
pub(crate) const EMAIL_SERVICE_ENV: &str = "EMAIL_SERVICE";
pub(crate) const EMAIL_USER_ENV: &str = "EMAIL_USER";
pub(crate) const EMAIL_PASS_ENV: &str = "EMAIL_PASS";
pub(crate) const FROM_EMAIL_ENV: &str = "FROM_EMAIL";
pub(crate) const NOTIFY_TIMEOUT_ENV: &str = "SOS_NOTIFY_TIMEOUT_SECS";

const DEFAULT_TWILIO_API_BASE_URL: &str = "https://api.twilio.com/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 120;

/// Errors raised for present but unusable transport settings.
#[derive(Debug, thiserror::Error)]
pub enum TransportConfigError {
    /// `TWILIO_API_BASE_URL` is not an absolute URL.
    #[error("invalid TWILIO_API_BASE_URL '{value}': {source}")]
    InvalidTwilioBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Twilio REST credentials and sender number.
#[derive(Clone)]
pub struct TwilioSettings {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub base_url: Url,
}

impl fmt::Debug for TwilioSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioSettings")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from_number", &self.from_number)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// SMTP relay credentials and sender address.
#[derive(Clone)]
pub struct SmtpSettings {
    /// Well-known provider name or a relay host name.
    pub service: String,
    pub username: String,
    pub password: String,
    /// Sender mailbox; defaults to `username`.
    pub from: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("service", &self.service)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

/// Settings for every notification channel.
#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Present when SMS delivery is enabled.
    pub twilio: Option<TwilioSettings>,
    /// Present when email delivery is enabled.
    pub smtp: Option<SmtpSettings>,
    /// Per-call timeout applied by every transport client.
    pub timeout: Duration,
}

impl TransportSettings {
    /// Read transport settings from `env`.
    ///
    /// # Examples
    /// ```
    /// use allergysafety_backend::outbound::transport_config::TransportSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|_| None);
    ///
    /// let settings = TransportSettings::from_env(&env).expect("defaults are valid");
    /// assert!(settings.twilio.is_none());
    /// assert_eq!(settings.timeout.as_secs(), 10);
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, TransportConfigError> {
        Ok(Self {
            twilio: twilio_from_env(env)?,
            smtp: smtp_from_env(env),
            timeout: timeout_from_env(env),
        })
    }
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn twilio_from_env<E: Env>(env: &E) -> Result<Option<TwilioSettings>, TransportConfigError> {
    let (Some(account_sid), Some(auth_token), Some(from_number)) = (
        non_blank(env, TWILIO_ACCOUNT_SID_ENV),
        non_blank(env, TWILIO_AUTH_TOKEN_ENV),
        non_blank(env, TWILIO_PHONE_NUMBER_ENV),
    ) else {
        warn!("Twilio credentials incomplete; SMS notifications disabled");
        return Ok(None);
    };

    let raw_base = non_blank(env, TWILIO_API_BASE_URL_ENV)
        .unwrap_or_else(|| DEFAULT_TWILIO_API_BASE_URL.to_owned());
    let base_url = Url::parse(&raw_base).map_err(|source| {
        TransportConfigError::InvalidTwilioBaseUrl {
            value: raw_base.clone(),
            source,
        }
    })?;

    Ok(Some(TwilioSettings {
        account_sid,
        auth_token,
        from_number,
        base_url,
    }))
}

fn smtp_from_env<E: Env>(env: &E) -> Option<SmtpSettings> {
    let (Some(service), Some(username), Some(password)) = (
        non_blank(env, EMAIL_SERVICE_ENV),
        non_blank(env, EMAIL_USER_ENV),
        non_blank(env, EMAIL_PASS_ENV),
    ) else {
        warn!("email credentials incomplete; email notifications disabled");
        return None;
    };
    let from = non_blank(env, FROM_EMAIL_ENV).unwrap_or_else(|| username.clone());
    Some(SmtpSettings {
        service,
        username,
        password,
        from,
    })
}

fn timeout_from_env<E: Env>(env: &E) -> Duration {
    let secs = match non_blank(env, NOTIFY_TIMEOUT_ENV) {
        None => DEFAULT_TIMEOUT_SECS,
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) => secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
            Err(error) => {
                warn!(value = %raw, %error, "invalid SOS_NOTIFY_TIMEOUT_SECS; using default");
                DEFAULT_TIMEOUT_SECS
            }
        },
    };
    Duration::from_secs(secs)
}
