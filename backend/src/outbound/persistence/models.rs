//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{emergency_contacts, sos_alerts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub full_name: String,
}

/// Row struct for reading from the emergency_contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = emergency_contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub relationship: String,
}

/// Row struct for reading from the sos_alerts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sos_alerts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AlertRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub raised_at: DateTime<Utc>,
    pub status: String,
}

/// Insertable struct for appending alert records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sos_alerts)]
pub(crate) struct NewAlertRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub raised_at: DateTime<Utc>,
    pub status: &'a str,
}
