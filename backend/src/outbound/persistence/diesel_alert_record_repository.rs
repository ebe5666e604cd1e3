//! PostgreSQL-backed `AlertRecordRepository` using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AlertRecordRepository, AlertRecordRepositoryError};
use crate::domain::{AlertRecord, AlertStatus, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AlertRow, NewAlertRow};
use super::pool::{DbPool, PoolError};
use super::schema::sos_alerts;

/// Diesel-backed implementation of the `AlertRecordRepository` port.
#[derive(Clone)]
pub struct DieselAlertRecordRepository {
    pool: DbPool,
}

impl DieselAlertRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AlertRecordRepositoryError {
    map_basic_pool_error(error, AlertRecordRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AlertRecordRepositoryError {
    map_basic_diesel_error(
        error,
        AlertRecordRepositoryError::query,
        AlertRecordRepositoryError::connection,
    )
}

fn row_to_record(row: AlertRow) -> Result<AlertRecord, AlertRecordRepositoryError> {
    let status: AlertStatus = row.status.parse().map_err(|err| {
        AlertRecordRepositoryError::query(format!("alert {} has {err}", row.id))
    })?;
    Ok(AlertRecord::from_parts(
        row.id,
        UserId::from_uuid(row.user_id),
        row.raised_at,
        status,
    ))
}

fn record_to_row(record: &AlertRecord) -> NewAlertRow<'static> {
    NewAlertRow {
        id: record.id(),
        user_id: *record.user_id().as_uuid(),
        raised_at: record.timestamp(),
        status: record.status().as_str(),
    }
}

#[async_trait]
impl AlertRecordRepository for DieselAlertRecordRepository {
    async fn append(&self, record: &AlertRecord) -> Result<(), AlertRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(sos_alerts::table)
            .values(&record_to_row(record))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AlertRecord>, AlertRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AlertRow> = sos_alerts::table
            .filter(sos_alerts::user_id.eq(user_id.as_uuid()))
            .order((sos_alerts::raised_at.desc(), sos_alerts::id.desc()))
            .select(AlertRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }
}
