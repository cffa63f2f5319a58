use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::customs::format::{currency_br, date_br, date_long_en};
use crate::customs::{Money, Weight};
use crate::models::order::OrderRow;
use crate::orders::status::normalize_status;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

/// Query string of `GET /api/v1/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderQuery {
    pub search: Option<String>,
    /// `"all"`, a normalized status, or a raw `status_logistico`.
    pub status: Option<String>,
    pub sort: SortOrder,
}

/// Row of the order table.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub id: Uuid,
    pub customer: String,
    pub email: String,
    pub amount: Money,
    pub currency: String,
    /// Normalized (lower-kebab) status.
    pub status: String,
    pub status_logistico: String,
    pub date: DateTime<Utc>,
    pub shopify_order_id: Option<String>,
    pub total_weight: Weight,
    pub amount_display: String,
    pub date_display: String,
    pub date_long: String,
}

impl From<&OrderRow> for OrderSummary {
    fn from(row: &OrderRow) -> Self {
        let currency = row
            .currency
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "USD".to_string());
        let amount = Money::from_cents(row.total_value_cents).unwrap_or_default();

        OrderSummary {
            id: row.id,
            customer: row.customer_name.clone(),
            email: row.address().email.clone().unwrap_or_default(),
            amount,
            amount_display: currency_br(amount, &currency),
            currency,
            status: normalize_status(&row.status_logistico),
            status_logistico: row.status_logistico.clone(),
            date: row.created_at,
            shopify_order_id: row.shopify_order_id.clone(),
            total_weight: Weight::from_grams(row.total_weight_grams).unwrap_or_default(),
            date_display: date_br(&row.created_at),
            date_long: date_long_en(&row.created_at),
        }
    }
}

impl OrderSummary {
    fn matches_search(&self, needle: &str) -> bool {
        let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
        contains(&self.id.to_string())
            || contains(&self.customer)
            || contains(&self.email)
            || self.shopify_order_id.as_deref().is_some_and(contains)
    }

    fn matches_status(&self, wanted: &str) -> bool {
        wanted == "all" || self.status == wanted || self.status_logistico == wanted
    }
}

/// Applies search, status filter and date sort to the stored rows.
pub fn filter_orders(rows: &[OrderRow], query: &OrderQuery) -> Vec<OrderSummary> {
    let needle = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("all");

    let mut orders: Vec<OrderSummary> = rows
        .iter()
        .map(OrderSummary::from)
        .filter(|o| needle.is_empty() || o.matches_search(&needle))
        .filter(|o| o.matches_status(status))
        .collect();

    match query.sort {
        SortOrder::Desc => orders.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Asc => orders.sort_by(|a, b| a.date.cmp(&b.date)),
    }
    orders
}
