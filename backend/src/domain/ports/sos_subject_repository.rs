//! Port for loading the user raising an alert together with their contacts.

use async_trait::async_trait;

use crate::domain::{EmergencyContact, FullName, SosUser, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by SOS subject repository adapters.
    pub enum SosSubjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "sos subject repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "sos subject repository query failed: {message}",
    }
}

/// A user and the contacts to notify on their behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SosSubject {
    /// The user raising the alert.
    pub user: SosUser,
    /// Contacts in storage order. May be empty.
    pub contacts: Vec<EmergencyContact>,
}

/// Port for reading SOS subjects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SosSubjectRepository: Send + Sync {
    /// Load the user and their contacts; `None` when the user does not exist.
    async fn find_subject(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SosSubject>, SosSubjectRepositoryError>;
}

/// Fixture repository returning a named user without contacts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSosSubjectRepository;

#[async_trait]
impl SosSubjectRepository for FixtureSosSubjectRepository {
    async fn find_subject(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SosSubject>, SosSubjectRepositoryError> {
        let full_name = FullName::new("AllergySafety User")
            .map_err(|err| SosSubjectRepositoryError::query(err.to_string()))?;
        Ok(Some(SosSubject {
            user: SosUser::new(user_id.clone(), full_name),
            contacts: Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_returns_user_without_contacts() {
        let user_id = UserId::random();
        let subject = FixtureSosSubjectRepository
            .find_subject(&user_id)
            .await
            .expect("fixture lookup succeeds")
            .expect("fixture user present");
        assert_eq!(subject.user.id(), &user_id);
        assert!(subject.contacts.is_empty());
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = SosSubjectRepositoryError::connection("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }
}
