//! Twilio SMS outbound adapter.
//!
//! Implements the `SmsSender` port over the Twilio Messages REST API.

mod dto;
mod http_sender;

pub use http_sender::{TwilioSetupError, TwilioSmsSender};
