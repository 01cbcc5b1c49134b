//! Order row model.

use ordini_core::error::CoreError;
use ordini_core::order::Order;
use ordini_core::order_status::{OrderStatus, StatusId};
use ordini_core::readiness::ReadinessSignals;
use ordini_core::types::{DbId, Timestamp, Version};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: DbId,
    pub uuid: Uuid,
    pub code: String,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<chrono::NaiveDate>,
    pub status_id: StatusId,
    pub quantity: Decimal,
    pub worked_quantity: Decimal,
    pub motivazione: Option<String>,
    pub etichette: i16,
    pub packaging: i16,
    pub prodotto: i16,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<OrderRow> for Order {
    type Error = CoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::try_from(row.status_id).map_err(|e| {
            CoreError::Internal(format!("order {} has corrupt status: {e}", row.uuid))
        })?;
        let signals = ReadinessSignals::from_columns(row.etichette, row.packaging, row.prodotto)
            .map_err(|e| {
                CoreError::Internal(format!("order {} has corrupt signals: {e}", row.uuid))
            })?;

        Ok(Order {
            id: row.id,
            uuid: row.uuid,
            code: row.code,
            customer: row.customer,
            product: row.product,
            notes: row.notes,
            due_date: row.due_date,
            status,
            quantity: row.quantity,
            worked_quantity: row.worked_quantity,
            motivazione: row.motivazione,
            signals,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
