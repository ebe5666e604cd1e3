//! DTOs for decoding Twilio Messages API responses.

use serde::Deserialize;

/// Accepted message resource; only the SID is used as the provider reference.
#[derive(Debug, Deserialize)]
pub(super) struct TwilioMessageDto {
    pub(super) sid: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub(super) struct TwilioErrorDto {
    pub(super) code: Option<i64>,
    pub(super) message: Option<String>,
}

impl TwilioErrorDto {
    /// Render as `"<code>: <message>"`, or `None` when the body carried neither.
    pub(super) fn describe(&self) -> Option<String> {
        match (self.code, self.message.as_deref()) {
            (Some(code), Some(message)) => Some(format!("{code}: {message}")),
            (None, Some(message)) => Some(message.to_owned()),
            (Some(code), None) => Some(format!("error code {code}")),
            (None, None) => None,
        }
    }
}
