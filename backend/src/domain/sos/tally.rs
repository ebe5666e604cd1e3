//! Reduction of settled notification outcomes into counters and a status.

use std::fmt::Write as _;

use crate::domain::{AlertStatus, NotificationChannel, NotificationOutcome};

/// Per-channel delivery counters for one activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryTally {
    /// SMS messages accepted by the provider.
    pub sms_sent: u32,
    /// SMS messages that failed.
    pub sms_failed: u32,
    /// SMS tasks skipped for lack of a phone number.
    pub sms_skipped: u32,
    /// Emails accepted by the relay.
    pub email_sent: u32,
    /// Emails that failed.
    pub email_failed: u32,
    /// Email tasks skipped for lack of an address.
    pub email_skipped: u32,
}

impl DeliveryTally {
    /// Count every outcome.
    ///
    /// # Examples
    /// ```
    /// use allergysafety_backend::domain::{
    ///     AlertStatus, ContactName, DeliveryTally, NotificationChannel, NotificationOutcome,
    ///     SkipReason,
    /// };
    ///
    /// let contact = ContactName::new("Sam").expect("name");
    /// let tally = DeliveryTally::from_outcomes(&[NotificationOutcome::Skipped {
    ///     channel: NotificationChannel::Sms,
    ///     contact,
    ///     reason: SkipReason::MissingContactField,
    /// }]);
    /// assert_eq!(tally.sms_skipped, 1);
    /// assert_eq!(tally.status(), AlertStatus::Sent);
    /// ```
    pub fn from_outcomes(outcomes: &[NotificationOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut tally, outcome| {
            tally.record(outcome);
            tally
        })
    }

    /// Count one outcome.
    pub fn record(&mut self, outcome: &NotificationOutcome) {
        let counter = match (outcome.channel(), outcome) {
            (NotificationChannel::Sms, NotificationOutcome::Sent { .. }) => &mut self.sms_sent,
            (NotificationChannel::Sms, NotificationOutcome::Failed { .. }) => &mut self.sms_failed,
            (NotificationChannel::Sms, NotificationOutcome::Skipped { .. }) => {
                &mut self.sms_skipped
            }
            (NotificationChannel::Email, NotificationOutcome::Sent { .. }) => &mut self.email_sent,
            (NotificationChannel::Email, NotificationOutcome::Failed { .. }) => {
                &mut self.email_failed
            }
            (NotificationChannel::Email, NotificationOutcome::Skipped { .. }) => {
                &mut self.email_skipped
            }
        };
        *counter = counter.saturating_add(1);
    }

    /// Sent messages across channels.
    pub fn successes(&self) -> u32 {
        self.sms_sent.saturating_add(self.email_sent)
    }

    /// Failed messages across channels.
    pub fn failures(&self) -> u32 {
        self.sms_failed.saturating_add(self.email_failed)
    }

    /// Skipped tasks across channels.
    pub fn skipped(&self) -> u32 {
        self.sms_skipped.saturating_add(self.email_skipped)
    }

    /// Status derived from the counts alone.
    ///
    /// `Failed` when something failed and nothing succeeded, `Partial` when
    /// both happened, otherwise `Sent`. An all-skipped activation is `Sent`.
    pub fn status(&self) -> AlertStatus {
        match (self.successes(), self.failures()) {
            (_, 0) => AlertStatus::Sent,
            (0, _) => AlertStatus::Failed,
            _ => AlertStatus::Partial,
        }
    }

    /// Human-readable summary; zero counters are omitted.
    pub fn summary(&self) -> String {
        let mut summary = String::from("SOS alert processing complete.");
        let parts = [
            (self.sms_sent, "SMS sent."),
            (self.email_sent, "emails sent."),
            (self.sms_failed, "SMS failed."),
            (self.email_failed, "emails failed."),
            (self.sms_skipped, "SMS skipped (missing contact info)."),
            (self.email_skipped, "emails skipped (missing contact info)."),
        ];
        for (count, label) in parts {
            if count > 0 {
                // Writing into a `String` cannot fail.
                let _ = write!(summary, " {count} {label}");
            }
        }
        if self.successes() == 0 && self.failures() == 0 {
            summary.push_str(" No valid notification targets found.");
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn tally(sent: (u32, u32), failed: (u32, u32), skipped: (u32, u32)) -> DeliveryTally {
        DeliveryTally {
            sms_sent: sent.0,
            email_sent: sent.1,
            sms_failed: failed.0,
            email_failed: failed.1,
            sms_skipped: skipped.0,
            email_skipped: skipped.1,
        }
    }

    #[rstest]
    #[case(tally((1, 0), (0, 1), (0, 0)), AlertStatus::Partial)]
    #[case(tally((0, 0), (2, 2), (0, 0)), AlertStatus::Failed)]
    #[case(tally((0, 0), (1, 0), (3, 3)), AlertStatus::Failed)]
    #[case(tally((2, 1), (0, 0), (1, 0)), AlertStatus::Sent)]
    #[case(tally((0, 0), (0, 0), (1, 1)), AlertStatus::Sent)]
    #[case(tally((0, 0), (0, 0), (0, 0)), AlertStatus::Sent)]
    #[case(tally((0, 1), (1, 0), (0, 0)), AlertStatus::Partial)]
    fn status_depends_only_on_success_and_failure_counts(
        #[case] tally: DeliveryTally,
        #[case] expected: AlertStatus,
    ) {
        assert_eq!(tally.status(), expected);
    }

    #[rstest]
    fn summary_for_mixed_outcome() {
        let summary = tally((1, 0), (0, 1), (0, 0)).summary();
        assert_eq!(
            summary,
            "SOS alert processing complete. 1 SMS sent. 1 emails failed."
        );
    }

    #[rstest]
    fn summary_for_all_skipped() {
        let summary = tally((0, 0), (0, 0), (1, 1)).summary();
        assert_eq!(
            summary,
            "SOS alert processing complete. 1 SMS skipped (missing contact info). \
             1 emails skipped (missing contact info). No valid notification targets found."
        );
    }

    #[rstest]
    fn summary_for_total_failure_lists_only_failures() {
        let summary = tally((0, 0), (2, 2), (0, 0)).summary();
        assert_eq!(
            summary,
            "SOS alert processing complete. 2 SMS failed. 2 emails failed."
        );
        assert!(!summary.contains("sent"));
        assert!(!summary.contains("skipped"));
    }

    #[rstest]
    fn summary_surfaces_every_nonzero_counter() {
        let summary = tally((3, 2), (1, 1), (2, 1)).summary();
        for fragment in [
            "3 SMS sent.",
            "2 emails sent.",
            "1 SMS failed.",
            "1 emails failed.",
            "2 SMS skipped",
            "1 emails skipped",
        ] {
            assert!(summary.contains(fragment), "missing {fragment} in {summary}");
        }
        assert!(!summary.contains("No valid notification targets"));
    }
}
