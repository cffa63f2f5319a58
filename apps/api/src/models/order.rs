use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Shipping address as stored on the order (free-form JSON from the storefront).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShippingAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub number: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub province_code: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
}

impl ShippingAddress {
    /// `City/UF`, preferring the province code over the full name.
    pub fn city_state(&self) -> String {
        let city = self.city.as_deref().unwrap_or_default();
        let state = self
            .province_code
            .as_deref()
            .or(self.province.as_deref())
            .unwrap_or_default();
        format!("{city}/{state}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub shopify_order_id: Option<String>,
    pub status_logistico: String,
    pub customer_name: String,
    pub address_json: Json<ShippingAddress>,
    pub total_value_cents: i64,
    pub currency: Option<String>,
    pub total_weight_grams: i64,
    pub tracking_id: Option<String>,
    pub contract: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRow {
    pub fn address(&self) -> &ShippingAddress {
        &self.address_json.0
    }

    /// Storefront order number when known, otherwise the internal id.
    pub fn order_number(&self) -> String {
        self.shopify_order_id
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Numeric storefront id, used for the legacy item lookup.
    pub fn shopify_id_numeric(&self) -> Option<i64> {
        self.shopify_order_id.as_deref()?.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_internal_id: Option<Uuid>,
    pub order_id: Option<i64>,
    pub title: String,
    pub variant_title: Option<String>,
    pub quantity: i64,
    pub price_cents: i64,
    /// Per-unit weight; `None` when the storefront sent none.
    pub weight_grams: Option<i64>,
    pub ncm: Option<String>,
}

impl OrderItemRow {
    /// `"Title - Variant"`, or just the title.
    pub fn display_title(&self) -> String {
        match self.variant_title.as_deref().filter(|v| !v.is_empty()) {
            Some(variant) => format!("{} - {variant}", self.title),
            None => self.title.clone(),
        }
    }
}
