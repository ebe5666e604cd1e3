//! Fixed alert templates.

use crate::domain::{ContactName, FullName};

/// Plain-text SMS body.
pub fn sms_body(full_name: &FullName) -> String {
    format!(
        "EMERGENCY: {full_name} has activated an SOS alert from AllergySafety. \
         Please contact them immediately."
    )
}

/// Email subject line.
pub fn email_subject(full_name: &FullName) -> String {
    format!("URGENT: SOS Alert from {full_name} via AllergySafety")
}

/// HTML email body addressed to one contact.
pub fn email_html_body(contact: &ContactName, full_name: &FullName) -> String {
    let contact = escape_html(contact.as_str());
    let full_name = escape_html(full_name.as_str());
    format!(
        "<p>Dear {contact},</p>\n\
         <p>This is an urgent notification from AllergySafety.</p>\n\
         <p>Your contact, <strong>{full_name}</strong>, has activated an SOS alert.</p>\n\
         <p>Please try to contact them immediately.</p>\n\
         <p>This is an automated message. Do not reply.</p>\n\
         <br>\n\
         <p>AllergySafety Team</p>\n"
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn full_name() -> FullName {
        FullName::new("Ada Lovelace").expect("valid name")
    }

    #[rstest]
    fn sms_body_names_the_user(full_name: FullName) {
        assert_eq!(
            sms_body(&full_name),
            "EMERGENCY: Ada Lovelace has activated an SOS alert from AllergySafety. \
             Please contact them immediately."
        );
    }

    #[rstest]
    fn email_subject_names_the_user(full_name: FullName) {
        assert_eq!(
            email_subject(&full_name),
            "URGENT: SOS Alert from Ada Lovelace via AllergySafety"
        );
    }

    #[rstest]
    fn email_body_names_contact_and_user(full_name: FullName) {
        let contact = ContactName::new("Sam").expect("valid name");
        let body = email_html_body(&contact, &full_name);
        assert!(body.starts_with("<p>Dear Sam,</p>"));
        assert!(body.contains("<strong>Ada Lovelace</strong>"));
    }

    #[rstest]
    fn email_body_escapes_markup() {
        let contact = ContactName::new("<b>Sam</b>").expect("valid name");
        let user = FullName::new("Tom & \"Jerry\"").expect("valid name");
        let body = email_html_body(&contact, &user);
        assert!(body.contains("Dear &lt;b&gt;Sam&lt;/b&gt;,"));
        assert!(body.contains("<strong>Tom &amp; &quot;Jerry&quot;</strong>"));
    }
}
