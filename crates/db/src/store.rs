//! [`OrderStore`] backed by Postgres.

use async_trait::async_trait;
use ordini_core::error::CoreError;
use ordini_core::order::{NewOrder, Order, OrderFilter, UpdateOrder};
use ordini_core::readiness::ReadinessSignals;
use ordini_core::store::{OrderStore, StatusWrite, WriteOutcome};
use uuid::Uuid;

use crate::models::order::OrderRow;
use crate::repositories::OrderRepo;
use crate::DbPool;

/// Postgres implementation of the domain order store.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: DbPool,
}

impl PgOrderStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn create(&self, input: &NewOrder) -> Result<Order, CoreError> {
        input.validate()?;
        let row = OrderRepo::create(&self.pool, input)
            .await
            .map_err(classify_sqlx_error)?;
        Order::try_from(row)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Order>, CoreError> {
        OrderRepo::find_by_uuid(&self.pool, uuid)
            .await
            .map_err(classify_sqlx_error)?
            .map(Order::try_from)
            .transpose()
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, CoreError> {
        OrderRepo::list(&self.pool, filter)
            .await
            .map_err(classify_sqlx_error)?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    async fn update_details(
        &self,
        uuid: Uuid,
        input: &UpdateOrder,
    ) -> Result<Option<Order>, CoreError> {
        input.validate()?;
        OrderRepo::update_details(&self.pool, uuid, input)
            .await
            .map_err(classify_sqlx_error)?
            .map(Order::try_from)
            .transpose()
    }

    async fn save_signals(
        &self,
        uuid: Uuid,
        signals: ReadinessSignals,
    ) -> Result<Option<Order>, CoreError> {
        OrderRepo::save_signals(&self.pool, uuid, signals)
            .await
            .map_err(classify_sqlx_error)?
            .map(Order::try_from)
            .transpose()
    }

    async fn update_status(
        &self,
        uuid: Uuid,
        write: &StatusWrite,
    ) -> Result<WriteOutcome, CoreError> {
        let updated: Option<OrderRow> = OrderRepo::update_status_if_version(
            &self.pool,
            uuid,
            write.status,
            write.motivazione.as_deref(),
            write.expected_version,
        )
        .await
        .map_err(classify_sqlx_error)?;

        if let Some(row) = updated {
            return Ok(WriteOutcome::Updated(Order::try_from(row)?));
        }

        let current = OrderRepo::current_version(&self.pool, uuid)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(match current {
            Some(current) => WriteOutcome::VersionMismatch { current },
            None => WriteOutcome::NotFound,
        })
    }

    async fn delete(&self, uuid: Uuid) -> Result<bool, CoreError> {
        OrderRepo::delete(&self.pool, uuid)
            .await
            .map_err(classify_sqlx_error)
    }
}

/// Classify a sqlx error into a domain error.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to `Conflict`.
/// - Check constraint violations (`ck_`) map to `Validation`.
/// - Everything else maps to `Internal`.
pub fn classify_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            // PostgreSQL unique_violation
            Some("23505") if constraint.starts_with("uq_") => {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
            // PostgreSQL check_violation
            Some("23514") if constraint.starts_with("ck_") => {
                return CoreError::Validation(format!(
                    "Value violates check constraint: {constraint}"
                ));
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}
