use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::customs::format::{money_comma, weight_comma};
use crate::customs::{DeclarationTotals, LineItem, PaginationResult};
use crate::errors::AppError;
use crate::models::order::OrderRow;
use crate::orders::items::{fetch_item_rows, to_line_items};
use crate::orders::listing::{filter_orders, OrderQuery, OrderSummary};
use crate::orders::status::{OrderStatus, StatusInfo};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct TotalsDisplay {
    pub weight: String,
    pub items_value: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct OrderItemsResponse {
    pub order_id: Uuid,
    pub items: Vec<LineItem>,
    pub pages: PaginationResult,
    pub totals: DeclarationTotals,
    pub totals_display: TotalsDisplay,
}

pub(crate) async fn load_order(state: &AppState, id: Uuid) -> Result<OrderRow, AppError> {
    state
        .store
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))
}

/// GET /api/v1/orders
pub async fn handle_list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<OrderSummary>>, AppError> {
    let rows = state.store.list_orders().await?;
    Ok(Json(filter_orders(&rows, &query)))
}

/// GET /api/v1/orders/:id
pub async fn handle_get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderSummary>, AppError> {
    let order = load_order(&state, id).await?;
    Ok(Json(OrderSummary::from(&order)))
}

/// GET /api/v1/orders/:id/items
pub async fn handle_order_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderItemsResponse>, AppError> {
    let order = load_order(&state, id).await?;
    let rows = fetch_item_rows(state.store.as_ref(), &order).await?;
    let items = to_line_items(&rows, &state.config.item_defaults)?;

    let pages = state.config.page_capacities.paginate(&items);
    let totals = DeclarationTotals::compute(&items, state.config.freight, state.config.insurance);

    Ok(Json(OrderItemsResponse {
        order_id: order.id,
        totals_display: TotalsDisplay {
            weight: weight_comma(totals.total_weight),
            items_value: money_comma(totals.items_value),
            value: money_comma(totals.declared_value),
        },
        items,
        pages,
        totals,
    }))
}

/// PATCH /api/v1/orders/:id/status
pub async fn handle_change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<OrderSummary>, AppError> {
    let order = load_order(&state, id).await?;
    let next = OrderStatus::transition(&order.status_logistico, &req.status)?;

    let updated = state
        .store
        .update_status(id, next.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;

    info!(
        order_id = %id,
        from = %order.status_logistico,
        to = next.as_str(),
        "order status changed"
    );

    Ok(Json(OrderSummary::from(&updated)))
}

/// GET /api/v1/statuses
pub async fn handle_status_catalogue() -> Json<Vec<StatusInfo>> {
    Json(OrderStatus::ALL.into_iter().map(OrderStatus::info).collect())
}
