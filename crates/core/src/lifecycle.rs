//! Order lifecycle controller.
//!
//! Orchestrates readiness saves and status changes: loads the current order
//! from the [`OrderStore`], asks the transition rules for a decision and
//! writes the result back conditioned on the version it read. Errors are
//! returned verbatim; nothing is retried.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::CoreError;
use crate::order::{validate_reason_length, Order};
use crate::order_status::OrderStatus;
use crate::readiness::{RawSignals, ReadinessOutcome, ReadinessSignals};
use crate::store::{OrderStore, StatusWrite, WriteOutcome};
use crate::transition;
use crate::types::Version;

/// A requested status change on the common path.
#[derive(Debug, Clone)]
pub struct ChangeStatus {
    pub status: OrderStatus,
    pub motivazione: Option<String>,
    /// Version the caller last saw. When present it must match the stored one.
    pub expected_version: Option<Version>,
}

/// Entry point for every lifecycle mutation of an order.
#[derive(Clone)]
pub struct OrderLifecycle {
    store: Arc<dyn OrderStore>,
}

impl OrderLifecycle {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Current readiness triple of an order.
    pub async fn readiness(&self, uuid: Uuid) -> Result<ReadinessSignals, CoreError> {
        Ok(self.load(uuid).await?.signals)
    }

    /// Validate and persist a readiness triple.
    ///
    /// Never changes status; the returned outcome tells the caller whether
    /// the launch can be offered right away.
    pub async fn save_readiness(
        &self,
        uuid: Uuid,
        raw: &RawSignals,
    ) -> Result<ReadinessOutcome, CoreError> {
        let signals = ReadinessSignals::from_raw(raw)?;
        let order = self
            .store
            .save_signals(uuid, signals)
            .await?
            .ok_or_else(|| CoreError::order_not_found(uuid))?;

        let outcome = order.readiness_outcome();
        tracing::info!(
            order_uuid = %uuid,
            etichette = signals.etichette.id(),
            packaging = signals.packaging.id(),
            prodotto = signals.prodotto.id(),
            all_green = outcome.all_green,
            "Readiness signals saved",
        );
        Ok(outcome)
    }

    /// Statuses the order can move to right now, for presentation.
    pub async fn allowed_targets(&self, uuid: Uuid) -> Result<Vec<OrderStatus>, CoreError> {
        let order = self.load(uuid).await?;
        Ok(transition::allowed_targets(order.status, &order.signals))
    }

    /// Change status along the transition table.
    ///
    /// The reason is kept (trimmed) when suspending and cleared otherwise.
    pub async fn change_status(
        &self,
        uuid: Uuid,
        request: &ChangeStatus,
    ) -> Result<Order, CoreError> {
        let order = self.load(uuid).await?;
        check_expected_version(&order, request.expected_version)?;

        transition::validate(
            order.status,
            request.status,
            &order.signals,
            request.motivazione.as_deref(),
        )?;

        let motivazione = if request.status == OrderStatus::Sospeso {
            let reason = request
                .motivazione
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            validate_reason_length(reason)?;
            Some(reason.to_string())
        } else {
            None
        };

        self.write_status(order, request.status, motivazione).await
    }

    /// Move an order to IN_AVANZAMENTO outside the transition table.
    ///
    /// Operator escape hatch; every use is logged at warn level.
    pub async fn force_advance(
        &self,
        uuid: Uuid,
        expected_version: Option<Version>,
    ) -> Result<Order, CoreError> {
        let order = self.load(uuid).await?;
        check_expected_version(&order, expected_version)?;
        transition::validate_force_advance(order.status)?;

        tracing::warn!(
            order_uuid = %uuid,
            from = %order.status,
            "Forcing order to IN_AVANZAMENTO outside the transition table",
        );
        self.write_status(order, OrderStatus::InAvanzamento, None)
            .await
    }

    // ---- private helpers ----

    async fn load(&self, uuid: Uuid) -> Result<Order, CoreError> {
        self.store
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| CoreError::order_not_found(uuid))
    }

    async fn write_status(
        &self,
        order: Order,
        to: OrderStatus,
        motivazione: Option<String>,
    ) -> Result<Order, CoreError> {
        let write = StatusWrite {
            status: to,
            motivazione,
            expected_version: order.version,
        };

        match self.store.update_status(order.uuid, &write).await? {
            WriteOutcome::Updated(updated) => {
                tracing::info!(
                    order_uuid = %order.uuid,
                    from = %order.status,
                    to = %to,
                    version = updated.version,
                    "Order status changed",
                );
                Ok(updated)
            }
            WriteOutcome::NotFound => Err(CoreError::order_not_found(order.uuid)),
            WriteOutcome::VersionMismatch { current } => {
                tracing::info!(
                    order_uuid = %order.uuid,
                    read_version = order.version,
                    current_version = current,
                    "Status write lost a concurrent update",
                );
                Err(CoreError::Conflict(format!(
                    "Order {} was modified by another request (version {} is now {current}); reload and retry",
                    order.uuid, order.version
                )))
            }
        }
    }
}

fn check_expected_version(order: &Order, expected: Option<Version>) -> Result<(), CoreError> {
    match expected {
        Some(v) if v != order.version => Err(CoreError::Conflict(format!(
            "Order {} is at version {}, not {v}; reload and retry",
            order.uuid, order.version
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
