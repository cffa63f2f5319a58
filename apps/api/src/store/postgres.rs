use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::order::{OrderItemRow, OrderRow};
use crate::store::OrderStore;

// Numeric columns are converted to fixed-point integers in SQL so rows decode
// without a decimal type.
const ORDER_COLUMNS: &str = r#"
    id,
    shopify_order_id::TEXT AS shopify_order_id,
    COALESCE(status_logistico, '') AS status_logistico,
    COALESCE(customer_name, '') AS customer_name,
    COALESCE(address_json, '{}'::jsonb) AS address_json,
    ROUND(COALESCE(total_value, 0) * 100)::BIGINT AS total_value_cents,
    currency,
    ROUND(COALESCE(total_weight, 0) * 1000)::BIGINT AS total_weight_grams,
    tracking_id,
    contract,
    created_at,
    updated_at
"#;

const ITEM_COLUMNS: &str = r#"
    id,
    order_internal_id,
    order_id::BIGINT AS order_id,
    COALESCE(title, 'Unknown Product') AS title,
    variant_title,
    COALESCE(quantity, 1)::BIGINT AS quantity,
    ROUND(COALESCE(price, 0) * 100)::BIGINT AS price_cents,
    ROUND(weight * 1000)::BIGINT AS weight_grams,
    ncm
"#;

#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        PgOrderStore { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn list_orders(&self) -> Result<Vec<OrderRow>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<OrderRow>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn items_by_internal_id(&self, order_id: Uuid) -> Result<Vec<OrderItemRow>, AppError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_internal_id = $1"
        );
        let rows = sqlx::query_as::<_, OrderItemRow>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn items_by_shopify_id(
        &self,
        shopify_order_id: i64,
    ) -> Result<Vec<OrderItemRow>, AppError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1"
        );
        let rows = sqlx::query_as::<_, OrderItemRow>(&sql)
            .bind(shopify_order_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<Option<OrderRow>, AppError> {
        let sql = format!(
            "UPDATE orders SET status_logistico = $1, updated_at = NOW() WHERE id = $2 RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
