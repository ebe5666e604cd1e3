//! Emergency contacts notified when a user raises an SOS alert.
//!
//! Contacts are read-only to the SOS flow. A contact is reachable over SMS
//! when it carries a [`PhoneNumber`] and over email when it carries an
//! [`EmailAddress`]; a contact with neither is reachable on no channel.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors for contact fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    /// Contact name was blank.
    #[error("contact name must not be empty")]
    EmptyName,
    /// Phone number was blank.
    #[error("phone number must not be empty")]
    EmptyPhone,
    /// Email address was blank.
    #[error("email address must not be empty")]
    EmptyEmail,
    /// Relationship label was not recognised.
    #[error("unknown relationship: {0}")]
    UnknownRelationship(String),
}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        // Prefix match: trailing extensions are tolerated.
        Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn non_blank(
    raw: impl Into<String>,
    empty: ContactValidationError,
) -> Result<String, ContactValidationError> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    Ok(trimmed.to_owned())
}

/// Display label for a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactName(String);

impl ContactName {
    /// Validate and construct a contact name; surrounding whitespace is trimmed.
    pub fn new(name: impl Into<String>) -> Result<Self, ContactValidationError> {
        non_blank(name, ContactValidationError::EmptyName).map(Self)
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Phone number used as an SMS recipient.
///
/// Any non-blank value is accepted so a stored number always reaches the
/// SMS provider, which has the final say on whether it is deliverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Construct a phone number; surrounding whitespace is trimmed.
    ///
    /// # Examples
    /// ```
    /// use allergysafety_backend::domain::PhoneNumber;
    ///
    /// let spaced = PhoneNumber::new("+44 20 7946 0958").expect("non-blank");
    /// assert!(!spaced.is_conventional());
    /// assert!(PhoneNumber::new("555-010-0199").expect("non-blank").is_conventional());
    /// assert!(PhoneNumber::new("  ").is_err());
    /// ```
    pub fn new(phone: impl Into<String>) -> Result<Self, ContactValidationError> {
        non_blank(phone, ContactValidationError::EmptyPhone).map(Self)
    }

    /// Whether the number matches the pattern contact forms accept.
    pub fn is_conventional(&self) -> bool {
        phone_regex().is_match(&self.0)
    }

    /// Borrow the number.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Email address used as an email recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Construct an email address; surrounding whitespace is trimmed.
    ///
    /// Parsing into a mailbox happens in the email adapter.
    pub fn new(email: impl Into<String>) -> Result<Self, ContactValidationError> {
        non_blank(email, ContactValidationError::EmptyEmail).map(Self)
    }

    /// Whether the address matches the pattern contact forms accept.
    pub fn is_conventional(&self) -> bool {
        email_regex().is_match(&self.0)
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

macro_rules! string_newtype_conversions {
    ($($ty:ident),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $ty {
                type Error = ContactValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }
        )*
    };
}

string_newtype_conversions!(ContactName, PhoneNumber, EmailAddress);

/// How a contact relates to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Relationship {
    /// Parent or guardian.
    Parent,
    /// Brother or sister.
    Sibling,
    /// Partner.
    Spouse,
    /// Friend.
    Friend,
    /// Treating physician.
    Doctor,
    /// Anything else.
    #[default]
    Other,
}

impl Relationship {
    /// Stable storage label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "Parent",
            Self::Sibling => "Sibling",
            Self::Spouse => "Spouse",
            Self::Friend => "Friend",
            Self::Doctor => "Doctor",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Relationship {
    type Err = ContactValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Parent" => Ok(Self::Parent),
            "Sibling" => Ok(Self::Sibling),
            "Spouse" => Ok(Self::Spouse),
            "Friend" => Ok(Self::Friend),
            "Doctor" => Ok(Self::Doctor),
            "Other" => Ok(Self::Other),
            other => Err(ContactValidationError::UnknownRelationship(other.to_owned())),
        }
    }
}

/// A person to notify when the user raises an SOS alert.
///
/// # Examples
/// ```
/// use allergysafety_backend::domain::{ContactName, EmailAddress, EmergencyContact};
///
/// let contact = EmergencyContact::new(ContactName::new("Sam").expect("name"))
///     .with_email(EmailAddress::new("sam@example.com").expect("email"));
/// assert!(contact.phone().is_none());
/// assert_eq!(contact.email().map(|e| e.as_str()), Some("sam@example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyContact {
    name: ContactName,
    phone: Option<PhoneNumber>,
    email: Option<EmailAddress>,
    relationship: Relationship,
}

impl EmergencyContact {
    /// Build a contact with no reachable channels.
    pub fn new(name: ContactName) -> Self {
        Self {
            name,
            phone: None,
            email: None,
            relationship: Relationship::default(),
        }
    }

    /// Attach a phone number, enabling the SMS channel.
    #[must_use]
    pub fn with_phone(mut self, phone: PhoneNumber) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Attach an email address, enabling the email channel.
    #[must_use]
    pub fn with_email(mut self, email: EmailAddress) -> Self {
        self.email = Some(email);
        self
    }

    /// Record how the contact relates to the user.
    #[must_use]
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = relationship;
        self
    }

    /// Display label.
    pub fn name(&self) -> &ContactName {
        &self.name
    }

    /// SMS recipient, when known.
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Email recipient, when known.
    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Relationship to the user.
    pub fn relationship(&self) -> Relationship {
        self.relationship
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("+15550100199", true)]
    #[case("555-010-0199", true)]
    #[case("(555) 010 0199", true)]
    #[case("+44 20 7946 0958", false)]
    #[case("call me", false)]
    fn phone_numbers_keep_unconventional_values(#[case] raw: &str, #[case] conventional: bool) {
        let phone = PhoneNumber::new(raw).expect("non-blank phone accepted");
        assert_eq!(phone.as_str(), raw);
        assert_eq!(phone.is_conventional(), conventional);
    }

    #[rstest]
    #[case("sam@example.com", true)]
    #[case("first.last@mail.example.org", true)]
    #[case("grace+sos@example.com", false)]
    #[case("grace@example.info", false)]
    fn emails_keep_unconventional_values(#[case] raw: &str, #[case] conventional: bool) {
        let email = EmailAddress::new(raw).expect("non-blank email accepted");
        assert_eq!(email.as_str(), raw);
        assert_eq!(email.is_conventional(), conventional);
    }

    #[rstest]
    fn blank_fields_are_rejected() {
        assert_eq!(PhoneNumber::new(" \t"), Err(ContactValidationError::EmptyPhone));
        assert_eq!(EmailAddress::new(""), Err(ContactValidationError::EmptyEmail));
        assert_eq!(ContactName::new("  "), Err(ContactValidationError::EmptyName));
    }

    #[rstest]
    fn relationship_round_trips_through_labels() {
        for relationship in [
            Relationship::Parent,
            Relationship::Sibling,
            Relationship::Spouse,
            Relationship::Friend,
            Relationship::Doctor,
            Relationship::Other,
        ] {
            let parsed: Relationship = relationship.as_str().parse().expect("known label");
            assert_eq!(parsed, relationship);
        }
        assert!("Cousin".parse::<Relationship>().is_err());
    }

    #[rstest]
    fn contact_without_fields_has_no_channels() {
        let contact = EmergencyContact::new(ContactName::new("Pat").expect("name"));
        assert!(contact.phone().is_none());
        assert!(contact.email().is_none());
        assert_eq!(contact.relationship(), Relationship::Other);
    }
}
