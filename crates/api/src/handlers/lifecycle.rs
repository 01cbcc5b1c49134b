//! Handlers for readiness signals and status changes of a single order.

use axum::extract::State;
use axum::Json;
use ordini_core::error::CoreError;
use ordini_core::lifecycle::ChangeStatus;
use ordini_core::order_status::OrderStatus;
use ordini_core::readiness::{RawSignals, Signal};
use ordini_core::types::Version;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Current readiness triple of an order.
#[derive(Debug, Serialize)]
pub struct SemaforoView {
    pub etichette: Signal,
    pub packaging: Signal,
    pub prodotto: Signal,
    pub all_green: bool,
    pub green_count: usize,
}

/// Reply to a readiness save.
#[derive(Debug, Serialize)]
pub struct SaveSemaforoResponse {
    pub success: bool,
    pub message: String,
    pub all_green: bool,
    pub can_change_to_lanciato: bool,
}

/// Body of `POST /orders/{order}/change-status`.
///
/// `status` is taken as a plain integer so an unknown code is reported as a
/// validation error rather than a malformed body.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: i64,
    #[serde(default)]
    pub motivazione: Option<String>,
    /// With `status = 3`, skip the transition table.
    #[serde(default)]
    pub force: bool,
    /// Version the client displayed, if it wants the write to be conditional on it.
    #[serde(default)]
    pub version: Option<Version>,
}

#[derive(Debug, Serialize)]
pub struct ChangeStatusResponse {
    pub success: bool,
    pub message: String,
    pub status: OrderStatus,
    pub version: Version,
}

/// One entry of the allowed-statuses list.
#[derive(Debug, Serialize)]
pub struct StatusOption {
    pub id: i16,
    pub name: &'static str,
    pub label: &'static str,
}

impl From<OrderStatus> for StatusOption {
    fn from(status: OrderStatus) -> Self {
        Self {
            id: status.id(),
            name: status.name(),
            label: status.label(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /orders/{order}/semaforo
pub async fn get_semaforo(
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<Uuid>,
) -> AppResult<Json<DataResponse<SemaforoView>>> {
    let signals = state.lifecycle.readiness(uuid).await?;
    Ok(Json(DataResponse {
        data: SemaforoView {
            etichette: signals.etichette,
            packaging: signals.packaging,
            prodotto: signals.prodotto,
            all_green: signals.all_green(),
            green_count: signals.green_count(),
        },
    }))
}

/// POST /orders/{order}/save-semaforo
pub async fn save_semaforo(
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<Uuid>,
    ApiJson(raw): ApiJson<RawSignals>,
) -> AppResult<Json<SaveSemaforoResponse>> {
    let outcome = state.lifecycle.save_readiness(uuid, &raw).await?;
    let message = if outcome.can_transition_to_launched {
        "Readiness saved; the order can now be launched"
    } else {
        "Readiness saved"
    };
    Ok(Json(SaveSemaforoResponse {
        success: true,
        message: message.to_string(),
        all_green: outcome.all_green,
        can_change_to_lanciato: outcome.can_transition_to_launched,
    }))
}

/// POST /orders/{order}/change-status
///
/// `force: true` together with `status = 3` goes through the force-advance
/// path; for any other target the flag is ignored.
pub async fn change_status(
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<Uuid>,
    ApiJson(input): ApiJson<ChangeStatusRequest>,
) -> AppResult<Json<ChangeStatusResponse>> {
    let requested = parse_status(input.status)?;

    let order = if input.force && requested == OrderStatus::InAvanzamento {
        state.lifecycle.force_advance(uuid, input.version).await?
    } else {
        let request = ChangeStatus {
            status: requested,
            motivazione: input.motivazione,
            expected_version: input.version,
        };
        state.lifecycle.change_status(uuid, &request).await?
    };

    Ok(Json(ChangeStatusResponse {
        success: true,
        message: format!("Order {} moved to {}", order.code, order.status.name()),
        status: order.status,
        version: order.version,
    }))
}

/// GET /orders/{order}/allowed-statuses
pub async fn allowed_statuses(
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<Uuid>,
) -> AppResult<Json<DataResponse<Vec<StatusOption>>>> {
    let targets = state.lifecycle.allowed_targets(uuid).await?;
    Ok(Json(DataResponse {
        data: targets.into_iter().map(StatusOption::from).collect(),
    }))
}

fn parse_status(raw: i64) -> Result<OrderStatus, CoreError> {
    i16::try_from(raw)
        .ok()
        .and_then(|id| OrderStatus::try_from(id).ok())
        .ok_or_else(|| CoreError::Validation(format!("status must be between 0 and 6, got {raw}")))
}
