//! Order status transition rules.
//!
//! The common path is a plain table from the current status to the statuses
//! reachable from it, with one readiness-gated edge (IN_ALLESTIMENTO to
//! LANCIATO). SOSPESO is reachable from every non-terminal status. Moving to
//! IN_AVANZAMENTO outside the table is a separate, explicitly named operation
//! ([`validate_force_advance`]) and never goes through [`validate`].

use crate::error::CoreError;
use crate::order_status::OrderStatus;
use crate::readiness::ReadinessSignals;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a requested status change was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("A reason (motivazione) is required to suspend an order")]
    MissingReason,
}

impl From<TransitionError> for CoreError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::InvalidTransition { .. } => {
                CoreError::InvalidTransition(err.to_string())
            }
            TransitionError::MissingReason => CoreError::Validation(err.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// Statuses reachable from `from` on the common path, before the readiness
/// gate is applied and without the SOSPESO detour.
pub fn table_targets(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;

    match from {
        Pianificato => &[InAllestimento],
        // Gated: see `requires_all_green`.
        InAllestimento => &[Lanciato],
        Lanciato => &[InAvanzamento],
        InAvanzamento => &[Evaso],
        // Resume to any non-terminal status.
        Sospeso => &[Pianificato, InAllestimento, Lanciato, InAvanzamento, Evaso],
        Evaso => &[Saldato],
        Saldato => &[],
    }
}

/// Whether the edge `from -> to` is only open when every readiness signal is green.
pub fn requires_all_green(from: OrderStatus, to: OrderStatus) -> bool {
    from == OrderStatus::InAllestimento && to == OrderStatus::Lanciato
}

/// Every status reachable from `current` given the order's readiness signals,
/// in code order.
///
/// SALDATO is strictly terminal and yields an empty set. Every other status
/// may move to SOSPESO, SOSPESO included (re-suspending with a new reason).
pub fn allowed_targets(current: OrderStatus, signals: &ReadinessSignals) -> Vec<OrderStatus> {
    if current.is_terminal() {
        return Vec::new();
    }

    let mut targets: Vec<OrderStatus> = table_targets(current)
        .iter()
        .copied()
        .filter(|to| !requires_all_green(current, *to) || signals.all_green())
        .collect();
    targets.push(OrderStatus::Sospeso);
    targets.sort();
    targets.dedup();
    targets
}

/// Check whether `from -> to` is allowed on the common path.
pub fn can_transition(from: OrderStatus, to: OrderStatus, signals: &ReadinessSignals) -> bool {
    allowed_targets(from, signals).contains(&to)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a requested status change.
///
/// The reachability check runs first; a suspension additionally needs a
/// non-blank reason.
pub fn validate(
    current: OrderStatus,
    requested: OrderStatus,
    signals: &ReadinessSignals,
    reason: Option<&str>,
) -> Result<(), TransitionError> {
    if !can_transition(current, requested, signals) {
        return Err(TransitionError::InvalidTransition {
            from: current,
            to: requested,
        });
    }

    if requested == OrderStatus::Sospeso && reason.map_or(true, |r| r.trim().is_empty()) {
        return Err(TransitionError::MissingReason);
    }

    Ok(())
}

/// Validate the operator escape hatch that moves an order straight to
/// IN_AVANZAMENTO regardless of the table.
///
/// Refused only from SALDATO (terminal) and from IN_AVANZAMENTO itself.
pub fn validate_force_advance(current: OrderStatus) -> Result<(), TransitionError> {
    match current {
        OrderStatus::Saldato | OrderStatus::InAvanzamento => {
            Err(TransitionError::InvalidTransition {
                from: current,
                to: OrderStatus::InAvanzamento,
            })
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
