//! PostgreSQL-backed `SosSubjectRepository` using Diesel ORM.
//!
//! Loads the user row, then every contact row in creation order. Blank
//! stored phone or email values count as absent. Any other stored value is
//! handed to the transports unchanged, so a malformed recipient surfaces as
//! a failed delivery rather than a skip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{SosSubject, SosSubjectRepository, SosSubjectRepositoryError};
use crate::domain::{
    ContactName, EmailAddress, EmergencyContact, FullName, PhoneNumber, Relationship, SosUser,
    UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ContactRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{emergency_contacts, users};

/// Diesel-backed implementation of the `SosSubjectRepository` port.
#[derive(Clone)]
pub struct DieselSosSubjectRepository {
    pool: DbPool,
}

impl DieselSosSubjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SosSubjectRepositoryError {
    map_basic_pool_error(error, SosSubjectRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SosSubjectRepositoryError {
    map_basic_diesel_error(
        error,
        SosSubjectRepositoryError::query,
        SosSubjectRepositoryError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<SosUser, SosSubjectRepositoryError> {
    let full_name = FullName::new(row.full_name).map_err(|err| {
        SosSubjectRepositoryError::query(format!("invalid stored name for user {}: {err}", row.id))
    })?;
    Ok(SosUser::new(UserId::from_uuid(row.id), full_name))
}

fn row_to_contact(row: ContactRow) -> Option<EmergencyContact> {
    let name = match ContactName::new(row.name) {
        Ok(name) => name,
        Err(error) => {
            warn!(contact_id = %row.id, %error, "skipping contact with invalid name");
            return None;
        }
    };
    let mut contact = EmergencyContact::new(name);

    if let Some(phone) = row.phone.and_then(|raw| PhoneNumber::new(raw).ok()) {
        if !phone.is_conventional() {
            warn!(contact_id = %row.id, "stored phone has an unusual format");
        }
        contact = contact.with_phone(phone);
    }
    if let Some(email) = row.email.and_then(|raw| EmailAddress::new(raw).ok()) {
        if !email.is_conventional() {
            warn!(contact_id = %row.id, "stored email has an unusual format");
        }
        contact = contact.with_email(email);
    }

    let relationship = row.relationship.parse().unwrap_or_else(|_| {
        warn!(
            contact_id = %row.id,
            value = row.relationship.as_str(),
            "unrecognised relationship, defaulting to Other"
        );
        Relationship::Other
    });
    Some(contact.with_relationship(relationship))
}

#[async_trait]
impl SosSubjectRepository for DieselSosSubjectRepository {
    async fn find_subject(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SosSubject>, SosSubjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuid = *user_id.as_uuid();

        let user_row = users::table
            .filter(users::id.eq(uuid))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(user_row) = user_row else {
            return Ok(None);
        };

        let contact_rows = emergency_contacts::table
            .filter(emergency_contacts::user_id.eq(uuid))
            .order((emergency_contacts::created_at.asc(), emergency_contacts::id.asc()))
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(SosSubject {
            user: row_to_user(user_row)?,
            contacts: contact_rows.into_iter().filter_map(row_to_contact).collect(),
        }))
    }
}
