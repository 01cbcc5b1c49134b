//! In-memory [`OrderStore`] implementation.
//!
//! Keeps orders in a `HashMap` behind a read-write lock. Nothing survives a
//! restart; used by tests and by the server when no database is configured.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CoreError;
use crate::order::{NewOrder, Order, OrderFilter, UpdateOrder};
use crate::order_status::OrderStatus;
use crate::readiness::ReadinessSignals;
use crate::store::{OrderStore, StatusWrite, WriteOutcome};
use crate::types::DbId;

#[derive(Default)]
struct Inner {
    orders: HashMap<Uuid, Order>,
    last_id: DbId,
}

/// Volatile order storage.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, input: &NewOrder) -> Result<Order, CoreError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        ensure_code_free(&inner, &input.code, None)?;
        inner.last_id += 1;
        let now = Utc::now();
        let order = Order {
            id: inner.last_id,
            uuid: Uuid::new_v4(),
            code: input.code.clone(),
            customer: input.customer.clone(),
            product: input.product.clone(),
            notes: input.notes.clone(),
            due_date: input.due_date,
            status: OrderStatus::Pianificato,
            quantity: input.quantity,
            worked_quantity: input.worked_quantity.unwrap_or(Decimal::ZERO),
            motivazione: None,
            signals: ReadinessSignals::ALL_RED,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        inner.orders.insert(order.uuid, order.clone());
        Ok(order)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Order>, CoreError> {
        Ok(self.inner.read().await.orders.get(&uuid).cloned())
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, CoreError> {
        let inner = self.inner.read().await;
        let mut orders: Vec<Order> = inner
            .orders
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn update_details(
        &self,
        uuid: Uuid,
        input: &UpdateOrder,
    ) -> Result<Option<Order>, CoreError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        if let Some(code) = &input.code {
            ensure_code_free(&inner, code, Some(uuid))?;
        }
        let Some(order) = inner.orders.get_mut(&uuid) else {
            return Ok(None);
        };
        if let Some(code) = &input.code {
            order.code = code.clone();
        }
        if input.customer.is_some() {
            order.customer = input.customer.clone();
        }
        if input.product.is_some() {
            order.product = input.product.clone();
        }
        if input.notes.is_some() {
            order.notes = input.notes.clone();
        }
        if input.due_date.is_some() {
            order.due_date = input.due_date;
        }
        if let Some(quantity) = input.quantity {
            order.quantity = quantity;
        }
        if let Some(worked) = input.worked_quantity {
            order.worked_quantity = worked;
        }
        touch(order);
        Ok(Some(order.clone()))
    }

    async fn save_signals(
        &self,
        uuid: Uuid,
        signals: ReadinessSignals,
    ) -> Result<Option<Order>, CoreError> {
        let mut inner = self.inner.write().await;
        let Some(order) = inner.orders.get_mut(&uuid) else {
            return Ok(None);
        };
        order.signals = signals;
        touch(order);
        Ok(Some(order.clone()))
    }

    async fn update_status(
        &self,
        uuid: Uuid,
        write: &StatusWrite,
    ) -> Result<WriteOutcome, CoreError> {
        let mut inner = self.inner.write().await;
        let Some(order) = inner.orders.get_mut(&uuid) else {
            return Ok(WriteOutcome::NotFound);
        };
        if order.version != write.expected_version {
            return Ok(WriteOutcome::VersionMismatch {
                current: order.version,
            });
        }
        order.status = write.status;
        order.motivazione = write.motivazione.clone();
        touch(order);
        Ok(WriteOutcome::Updated(order.clone()))
    }

    async fn delete(&self, uuid: Uuid) -> Result<bool, CoreError> {
        Ok(self.inner.write().await.orders.remove(&uuid).is_some())
    }
}

/// Order codes are unique, like the `uq_orders_code` constraint in Postgres.
fn ensure_code_free(inner: &Inner, code: &str, except: Option<Uuid>) -> Result<(), CoreError> {
    let taken = inner
        .orders
        .values()
        .any(|o| o.code == code && Some(o.uuid) != except);
    if taken {
        return Err(CoreError::Conflict(format!(
            "Order code '{code}' already exists"
        )));
    }
    Ok(())
}

fn touch(order: &mut Order) {
    order.version += 1;
    order.updated_at = Utc::now();
}
