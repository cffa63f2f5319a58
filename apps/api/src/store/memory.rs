use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::order::{OrderItemRow, OrderRow};
use crate::store::OrderStore;

/// Test double backed by plain vectors.
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<OrderRow>>,
    items: Vec<OrderItemRow>,
}

impl MemoryOrderStore {
    pub fn new(orders: Vec<OrderRow>, items: Vec<OrderItemRow>) -> Self {
        MemoryOrderStore {
            orders: Mutex::new(orders),
            items,
        }
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn list_orders(&self) -> Result<Vec<OrderRow>, AppError> {
        let mut rows = self.orders.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<OrderRow>, AppError> {
        Ok(self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    async fn items_by_internal_id(&self, order_id: Uuid) -> Result<Vec<OrderItemRow>, AppError> {
        Ok(self
            .items
            .iter()
            .filter(|i| i.order_internal_id == Some(order_id))
            .cloned()
            .collect())
    }

    async fn items_by_shopify_id(
        &self,
        shopify_order_id: i64,
    ) -> Result<Vec<OrderItemRow>, AppError> {
        Ok(self
            .items
            .iter()
            .filter(|i| i.order_id == Some(shopify_order_id))
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<Option<OrderRow>, AppError> {
        let mut orders = self.orders.lock().unwrap();
        Ok(orders.iter_mut().find(|o| o.id == id).map(|o| {
            o.status_logistico = status.to_string();
            o.updated_at = Utc::now();
            o.clone()
        }))
    }
}
