//! Persistence boundary for production orders.
//!
//! The lifecycle logic never talks to a database directly. Implementations:
//! `ordini_db::PgOrderStore` (Postgres) and [`crate::memory::MemoryOrderStore`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;
use crate::order::{NewOrder, Order, OrderFilter, UpdateOrder};
use crate::order_status::OrderStatus;
use crate::readiness::ReadinessSignals;
use crate::types::Version;

/// A conditional status write.
///
/// Applied only if the stored version still equals `expected_version`; the
/// version is incremented on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusWrite {
    pub status: OrderStatus,
    /// Stored as-is; `None` clears any previous reason.
    pub motivazione: Option<String>,
    pub expected_version: Version,
}

/// Result of a conditional write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Updated(Order),
    NotFound,
    /// The row changed since it was read. Carries the version now stored.
    VersionMismatch { current: Version },
}

/// Storage operations for orders. Every successful write bumps `version`.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Validate `input` and insert it as PIANIFICATO with all signals red and
    /// version 1.
    async fn create(&self, input: &NewOrder) -> Result<Order, CoreError>;

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Order>, CoreError>;

    /// List orders matching `filter`, most recently created first.
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, CoreError>;

    /// Validate `input` and apply its non-`None` fields. Returns `None` if no
    /// such order.
    async fn update_details(
        &self,
        uuid: Uuid,
        input: &UpdateOrder,
    ) -> Result<Option<Order>, CoreError>;

    /// Replace the readiness triple wholesale. Returns `None` if no such order.
    async fn save_signals(
        &self,
        uuid: Uuid,
        signals: ReadinessSignals,
    ) -> Result<Option<Order>, CoreError>;

    /// Write a new status (and reason) if the version still matches.
    async fn update_status(&self, uuid: Uuid, write: &StatusWrite)
        -> Result<WriteOutcome, CoreError>;

    /// Administrative hard delete. Returns `true` if a row was removed.
    async fn delete(&self, uuid: Uuid) -> Result<bool, CoreError>;
}
