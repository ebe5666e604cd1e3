//! Well-known email provider relays.

/// How the connection to the relay is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaySecurity {
    /// Implicit TLS on port 465.
    Tls,
    /// Plain connection upgraded with STARTTLS on port 587.
    StartTls,
}

/// Relay host and security mode for an `EMAIL_SERVICE` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpRelay {
    pub host: String,
    pub security: RelaySecurity,
}

impl SmtpRelay {
    /// Resolve a provider name case-insensitively.
    ///
    /// Unknown names are treated as a relay host using implicit TLS.
    ///
    /// # Examples
    /// ```
    /// use allergysafety_backend::outbound::smtp::{RelaySecurity, SmtpRelay};
    ///
    /// let relay = SmtpRelay::for_service("Gmail");
    /// assert_eq!(relay.host, "smtp.gmail.com");
    /// assert_eq!(relay.security, RelaySecurity::Tls);
    /// ```
    pub fn for_service(service: &str) -> Self {
        let normalised = service.trim().to_ascii_lowercase();
        let (host, security) = match normalised.as_str() {
            "gmail" | "googlemail" => ("smtp.gmail.com", RelaySecurity::Tls),
            "outlook365" | "office365" => ("smtp.office365.com", RelaySecurity::StartTls),
            "hotmail" | "outlook" => ("smtp-mail.outlook.com", RelaySecurity::StartTls),
            "yahoo" => ("smtp.mail.yahoo.com", RelaySecurity::Tls),
            "icloud" => ("smtp.mail.me.com", RelaySecurity::StartTls),
            "zoho" => ("smtp.zoho.com", RelaySecurity::Tls),
            _ => {
                return Self {
                    host: service.trim().to_owned(),
                    security: RelaySecurity::Tls,
                };
            }
        };
        Self {
            host: host.to_owned(),
            security,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("gmail", "smtp.gmail.com", RelaySecurity::Tls)]
    #[case("Outlook365", "smtp.office365.com", RelaySecurity::StartTls)]
    #[case("hotmail", "smtp-mail.outlook.com", RelaySecurity::StartTls)]
    #[case(" Yahoo ", "smtp.mail.yahoo.com", RelaySecurity::Tls)]
    #[case("iCloud", "smtp.mail.me.com", RelaySecurity::StartTls)]
    #[case("zoho", "smtp.zoho.com", RelaySecurity::Tls)]
    #[case("mail.example.org", "mail.example.org", RelaySecurity::Tls)]
    fn resolves_service_names(
        #[case] service: &str,
        #[case] host: &str,
        #[case] security: RelaySecurity,
    ) {
        assert_eq!(
            SmtpRelay::for_service(service),
            SmtpRelay {
                host: host.to_owned(),
                security,
            }
        );
    }
}
