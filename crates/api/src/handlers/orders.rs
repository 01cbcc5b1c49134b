//! Handlers for the `/orders` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ordini_core::error::CoreError;
use ordini_core::order::{NewOrder, Order, OrderFilter, UpdateOrder};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// An order as rendered to clients: the stored fields plus values derived
/// for display.
#[derive(Debug, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub status_name: &'static str,
    pub status_label: &'static str,
    pub progress_percent: Decimal,
    pub all_green: bool,
    pub can_change_to_lanciato: bool,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let outcome = order.readiness_outcome();
        Self {
            status_name: order.status.name(),
            status_label: order.status.label(),
            progress_percent: order.progress_percent(),
            all_green: outcome.all_green,
            can_change_to_lanciato: outcome.can_transition_to_launched,
            order,
        }
    }
}

/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewOrder>,
) -> AppResult<(StatusCode, Json<DataResponse<OrderView>>)> {
    let order = state.orders.create(&input).await?;
    tracing::info!(order_uuid = %order.uuid, code = %order.code, "Order created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: order.into() }),
    ))
}

/// GET /orders?status=n
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<OrderFilter>,
) -> AppResult<Json<DataResponse<Vec<OrderView>>>> {
    let orders = state.orders.list(&filter).await?;
    Ok(Json(DataResponse {
        data: orders.into_iter().map(OrderView::from).collect(),
    }))
}

/// GET /orders/{order}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<Uuid>,
) -> AppResult<Json<DataResponse<OrderView>>> {
    let order = state
        .orders
        .find_by_uuid(uuid)
        .await?
        .ok_or_else(|| CoreError::order_not_found(uuid))?;
    Ok(Json(DataResponse { data: order.into() }))
}

/// PUT /orders/{order}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateOrder>,
) -> AppResult<Json<DataResponse<OrderView>>> {
    let order = state
        .orders
        .update_details(uuid, &input)
        .await?
        .ok_or_else(|| CoreError::order_not_found(uuid))?;
    Ok(Json(DataResponse { data: order.into() }))
}

/// DELETE /orders/{order}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    if state.orders.delete(uuid).await? {
        tracing::info!(order_uuid = %uuid, "Order deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::order_not_found(uuid).into())
    }
}
