//! Proxy to the external planning service.

use axum::extract::State;
use axum::Json;
use ordini_planning::{RescheduleRequest, RescheduleResponse};

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::state::AppState;

/// POST /api/planning/force-reschedule
///
/// Relays the planning service's reply unchanged, including non-zero
/// `error_code` values. Only transport failures become an error response.
pub async fn force_reschedule(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RescheduleRequest>,
) -> AppResult<Json<RescheduleResponse>> {
    let reply = state.planner.force_reschedule(input.order_uuid).await?;
    Ok(Json(reply))
}
