//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Users who can raise SOS alerts.
    users (id) {
        id -> Uuid,
        /// Name interpolated into alert messages.
        full_name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipients notified when their user raises an alert.
    emergency_contacts (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        phone -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        relationship -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per SOS activation with its aggregated status.
    sos_alerts (id) {
        id -> Uuid,
        user_id -> Uuid,
        raised_at -> Timestamptz,
        /// `Sent`, `Partial` or `Failed`.
        status -> Varchar,
    }
}

diesel::joinable!(emergency_contacts -> users (user_id));
diesel::joinable!(sos_alerts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, emergency_contacts, sos_alerts);
