//! Concurrent fanout of SOS notifications.
//!
//! One task is built per contact and configured channel. All tasks are
//! awaited together with `join_all`, so a failing or slow task never cancels
//! its siblings; every task settles to a [`NotificationOutcome`].

use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};
use tracing::{error, info};

use crate::domain::ports::{EmailMessage, EmailSender, SmsMessage, SmsSender};
use crate::domain::{
    EmergencyContact, NotificationChannel, NotificationOutcome, SkipReason, SosUser,
};

use super::templates;

/// Conditions under which no task is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// Neither SMS nor email delivery is configured.
    #[error("no notification transport configured")]
    NoTransportConfigured,
    /// The contact list is empty.
    #[error("no emergency contacts configured")]
    NoContactsConfigured,
}

/// Builds and runs notification tasks over the configured transports.
#[derive(Clone)]
pub struct NotificationDispatcher {
    sms: Option<Arc<dyn SmsSender>>,
    email: Option<Arc<dyn EmailSender>>,
}

impl NotificationDispatcher {
    /// Create a dispatcher; an absent transport disables its channel.
    pub fn new(sms: Option<Arc<dyn SmsSender>>, email: Option<Arc<dyn EmailSender>>) -> Self {
        Self { sms, email }
    }

    /// Fail when no channel is available.
    pub fn ensure_transport(&self) -> Result<(), DispatchError> {
        if self.sms.is_none() && self.email.is_none() {
            return Err(DispatchError::NoTransportConfigured);
        }
        Ok(())
    }

    /// Notify every contact on every configured channel.
    ///
    /// Returns one outcome per task once all tasks have settled.
    pub async fn dispatch(
        &self,
        user: &SosUser,
        contacts: &[EmergencyContact],
    ) -> Result<Vec<NotificationOutcome>, DispatchError> {
        self.ensure_transport()?;
        if contacts.is_empty() {
            return Err(DispatchError::NoContactsConfigured);
        }

        let mut tasks: Vec<BoxFuture<'static, NotificationOutcome>> = Vec::new();
        if let Some(sms) = &self.sms {
            let body = templates::sms_body(user.full_name());
            tasks.extend(
                contacts
                    .iter()
                    .map(|contact| sms_task(Arc::clone(sms), contact, body.clone())),
            );
        }
        if let Some(email) = &self.email {
            let subject = templates::email_subject(user.full_name());
            tasks.extend(contacts.iter().map(|contact| {
                let message = contact.email().map(|to| EmailMessage {
                    to: to.clone(),
                    subject: subject.clone(),
                    html_body: templates::email_html_body(contact.name(), user.full_name()),
                });
                email_task(Arc::clone(email), contact, message)
            }));
        }

        let outcomes = future::join_all(tasks).await;
        for outcome in &outcomes {
            log_outcome(user, outcome);
        }
        Ok(outcomes)
    }
}

fn skipped(channel: NotificationChannel, contact: &EmergencyContact) -> NotificationOutcome {
    NotificationOutcome::Skipped {
        channel,
        contact: contact.name().clone(),
        reason: SkipReason::MissingContactField,
    }
}

fn sms_task(
    sender: Arc<dyn SmsSender>,
    contact: &EmergencyContact,
    body: String,
) -> BoxFuture<'static, NotificationOutcome> {
    let Some(phone) = contact.phone() else {
        return future::ready(skipped(NotificationChannel::Sms, contact)).boxed();
    };
    let name = contact.name().clone();
    let message = SmsMessage {
        to: phone.clone(),
        body,
    };
    async move {
        let target = message.to.to_string();
        match sender.send_sms(&message).await {
            Ok(receipt) => NotificationOutcome::Sent {
                channel: NotificationChannel::Sms,
                contact: name,
                target,
                provider_ref: receipt.provider_ref,
            },
            Err(err) => NotificationOutcome::Failed {
                channel: NotificationChannel::Sms,
                contact: name,
                target,
                error: err.to_string(),
            },
        }
    }
    .boxed()
}

fn email_task(
    sender: Arc<dyn EmailSender>,
    contact: &EmergencyContact,
    message: Option<EmailMessage>,
) -> BoxFuture<'static, NotificationOutcome> {
    let Some(message) = message else {
        return future::ready(skipped(NotificationChannel::Email, contact)).boxed();
    };
    let name = contact.name().clone();
    async move {
        let target = message.to.to_string();
        match sender.send_email(&message).await {
            Ok(receipt) => NotificationOutcome::Sent {
                channel: NotificationChannel::Email,
                contact: name,
                target,
                provider_ref: receipt.provider_ref,
            },
            Err(err) => NotificationOutcome::Failed {
                channel: NotificationChannel::Email,
                contact: name,
                target,
                error: err.to_string(),
            },
        }
    }
    .boxed()
}

fn log_outcome(user: &SosUser, outcome: &NotificationOutcome) {
    match outcome {
        NotificationOutcome::Sent {
            channel,
            contact,
            target,
            provider_ref,
        } => info!(
            user_id = %user.id(),
            %channel,
            contact = contact.as_str(),
            target = target.as_str(),
            provider_ref = provider_ref.as_str(),
            "sos notification sent"
        ),
        NotificationOutcome::Skipped {
            channel,
            contact,
            reason,
        } => info!(
            user_id = %user.id(),
            %channel,
            contact = contact.as_str(),
            %reason,
            "sos notification skipped"
        ),
        NotificationOutcome::Failed {
            channel,
            contact,
            target,
            error,
        } => error!(
            user_id = %user.id(),
            %channel,
            contact = contact.as_str(),
            target = target.as_str(),
            error = error.as_str(),
            "sos notification failed"
        ),
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
