//! SMTP email outbound adapter.
//!
//! Implements the `EmailSender` port with `lettre`, resolving well-known
//! provider names to their submission relays.

mod lettre_sender;
mod services;

pub use lettre_sender::{SmtpEmailSender, SmtpSetupError};
pub use services::{RelaySecurity, SmtpRelay};
