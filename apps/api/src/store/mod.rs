//! Order data access. Handlers receive an `Arc<dyn OrderStore>` through `AppState`
//! instead of reaching for a shared client.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::order::{OrderItemRow, OrderRow};

pub use postgres::PgOrderStore;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRow>, AppError>;

    async fn get_order(&self, id: Uuid) -> Result<Option<OrderRow>, AppError>;

    async fn items_by_internal_id(&self, order_id: Uuid) -> Result<Vec<OrderItemRow>, AppError>;

    /// Items keyed by the storefront's numeric order id (older imports).
    async fn items_by_shopify_id(&self, shopify_order_id: i64)
        -> Result<Vec<OrderItemRow>, AppError>;

    /// Persists a new logistics status; returns the updated row, or `None` if the order is gone.
    async fn update_status(&self, id: Uuid, status: &str) -> Result<Option<OrderRow>, AppError>;
}
