use tracing::{debug, warn};

use crate::customs::{ItemDefaults, LineItem};
use crate::errors::AppError;
use crate::models::order::{OrderItemRow, OrderRow};
use crate::store::OrderStore;

/// Fetches an order's item records.
///
/// Items are linked by `order_internal_id`; older imports only carry the
/// storefront's numeric `order_id`, so that is tried next.
pub async fn fetch_item_rows(
    store: &dyn OrderStore,
    order: &OrderRow,
) -> Result<Vec<OrderItemRow>, AppError> {
    let rows = store.items_by_internal_id(order.id).await?;
    if !rows.is_empty() {
        debug!(order_id = %order.id, count = rows.len(), "items found by internal id");
        return Ok(rows);
    }

    if let Some(shopify_id) = order.shopify_id_numeric() {
        let rows = store.items_by_shopify_id(shopify_id).await?;
        if !rows.is_empty() {
            debug!(order_id = %order.id, shopify_id, count = rows.len(), "items found by storefront id");
            return Ok(rows);
        }
    }

    warn!(
        order_id = %order.id,
        shopify_order_id = order.shopify_order_id.as_deref().unwrap_or("-"),
        "no order items found"
    );
    Ok(Vec::new())
}

pub fn to_line_items(rows: &[OrderItemRow], defaults: &ItemDefaults) -> Result<Vec<LineItem>, AppError> {
    rows.iter()
        .map(|row| LineItem::from_order_item(row, defaults).map_err(AppError::from))
        .collect()
}
