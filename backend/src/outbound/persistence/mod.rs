//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the SOS repository ports backed by PostgreSQL
//! via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel rows and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Database errors are mapped to the port error
//!   types without copying driver messages.
//!
//! # Example
//!
//! ```ignore
//! use allergysafety_backend::outbound::persistence::{
//!     DbPool, DieselSosSubjectRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/allergysafety")).await?;
//! let subjects = DieselSosSubjectRepository::new(pool);
//! ```

mod diesel_alert_record_repository;
mod diesel_basic_error_mapping;
mod diesel_sos_subject_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_alert_record_repository::DieselAlertRecordRepository;
pub use diesel_sos_subject_repository::DieselSosSubjectRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
