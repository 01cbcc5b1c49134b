//! Repository for the `orders` table.

use ordini_core::order::{NewOrder, OrderFilter, UpdateOrder};
use ordini_core::order_status::{OrderStatus, StatusId};
use ordini_core::readiness::ReadinessSignals;
use ordini_core::types::Version;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::order::OrderRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uuid, code, customer, product, notes, due_date, status_id, \
     quantity, worked_quantity, motivazione, etichette, packaging, prodotto, \
     version, created_at, updated_at";

/// Provides CRUD and conditional lifecycle writes for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order as PIANIFICATO with all signals red, returning the row.
    pub async fn create(pool: &PgPool, input: &NewOrder) -> Result<OrderRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders
                (uuid, code, customer, product, notes, due_date, status_id,
                 quantity, worked_quantity)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.code)
            .bind(&input.customer)
            .bind(&input.product)
            .bind(&input.notes)
            .bind(input.due_date)
            .bind(OrderStatus::Pianificato.id())
            .bind(input.quantity)
            .bind(input.worked_quantity)
            .fetch_one(pool)
            .await
    }

    /// Find an order by its external UUID.
    pub async fn find_by_uuid(pool: &PgPool, uuid: Uuid) -> Result<Option<OrderRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE uuid = $1");
        sqlx::query_as::<_, OrderRow>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// List orders, optionally filtered by status, most recently created first.
    pub async fn list(pool: &PgPool, filter: &OrderFilter) -> Result<Vec<OrderRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE ($1::SMALLINT IS NULL OR status_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, OrderRow>(&query)
            .bind(filter.status.map(StatusId::from))
            .fetch_all(pool)
            .await
    }

    /// Update order details. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `uuid` exists.
    pub async fn update_details(
        pool: &PgPool,
        uuid: Uuid,
        input: &UpdateOrder,
    ) -> Result<Option<OrderRow>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                code = COALESCE($2, code),
                customer = COALESCE($3, customer),
                product = COALESCE($4, product),
                notes = COALESCE($5, notes),
                due_date = COALESCE($6, due_date),
                quantity = COALESCE($7, quantity),
                worked_quantity = COALESCE($8, worked_quantity),
                version = version + 1
             WHERE uuid = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderRow>(&query)
            .bind(uuid)
            .bind(&input.code)
            .bind(&input.customer)
            .bind(&input.product)
            .bind(&input.notes)
            .bind(input.due_date)
            .bind(input.quantity)
            .bind(input.worked_quantity)
            .fetch_optional(pool)
            .await
    }

    /// Replace the readiness triple. Returns `None` if no such order.
    pub async fn save_signals(
        pool: &PgPool,
        uuid: Uuid,
        signals: ReadinessSignals,
    ) -> Result<Option<OrderRow>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                etichette = $2,
                packaging = $3,
                prodotto = $4,
                version = version + 1
             WHERE uuid = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderRow>(&query)
            .bind(uuid)
            .bind(signals.etichette.id())
            .bind(signals.packaging.id())
            .bind(signals.prodotto.id())
            .fetch_optional(pool)
            .await
    }

    /// Write status and reason only if the row is still at `expected_version`.
    ///
    /// Returns `None` when the uuid is unknown or the version moved on; callers
    /// tell the two apart with [`OrderRepo::current_version`].
    pub async fn update_status_if_version(
        pool: &PgPool,
        uuid: Uuid,
        status: OrderStatus,
        motivazione: Option<&str>,
        expected_version: Version,
    ) -> Result<Option<OrderRow>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                status_id = $2,
                motivazione = $3,
                version = version + 1
             WHERE uuid = $1 AND version = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderRow>(&query)
            .bind(uuid)
            .bind(status.id())
            .bind(motivazione)
            .bind(expected_version)
            .fetch_optional(pool)
            .await
    }

    /// Current version of an order, or `None` if it does not exist.
    pub async fn current_version(pool: &PgPool, uuid: Uuid) -> Result<Option<Version>, sqlx::Error> {
        sqlx::query_scalar::<_, Version>("SELECT version FROM orders WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an order. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, uuid: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE uuid = $1")
            .bind(uuid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
