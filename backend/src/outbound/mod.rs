//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **twilio**: SMS delivery over the Twilio REST API
//! - **smtp**: email delivery through an authenticated SMTP relay
//! - **transport_config**: environment settings shared by both transports
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
pub mod smtp;
pub mod transport_config;
pub mod twilio;
