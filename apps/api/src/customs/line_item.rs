use serde::Serialize;
use thiserror::Error;

use crate::customs::numeric::{Money, Weight};
use crate::models::order::OrderItemRow;

/// One customs declaration line.
///
/// Fields are private: `total_value` is fixed at construction as
/// `unit_value × quantity` and never re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    customs_code: String,
    quantity: u32,
    description: String,
    weight: Weight,
    unit_value: Money,
    total_value: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineItemError {
    #[error("quantity must be >= 0, got {0}")]
    NegativeQuantity(i64),

    #[error("line value overflowed for '{0}'")]
    Overflow(String),

    #[error("invalid item record: {0}")]
    Quantity(#[from] crate::customs::numeric::QuantityError),
}

/// Fallbacks applied when an order-item record is missing customs data.
#[derive(Debug, Clone)]
pub struct ItemDefaults {
    pub customs_code: String,
    /// Per-unit weight used when the record has no weight (or zero).
    pub unit_weight: Weight,
}

impl LineItem {
    pub fn new(
        customs_code: impl Into<String>,
        quantity: u32,
        description: impl Into<String>,
        weight: Weight,
        unit_value: Money,
    ) -> Result<Self, LineItemError> {
        let description = description.into();
        let total_value = unit_value
            .checked_times(quantity)
            .ok_or_else(|| LineItemError::Overflow(description.clone()))?;

        Ok(LineItem {
            customs_code: customs_code.into(),
            quantity,
            description,
            weight,
            unit_value,
            total_value,
        })
    }

    /// Builds a line from a stored order item.
    ///
    /// The declared weight is the record's per-unit weight times quantity,
    /// falling back to `defaults.unit_weight` per unit.
    pub fn from_order_item(row: &OrderItemRow, defaults: &ItemDefaults) -> Result<Self, LineItemError> {
        let quantity =
            u32::try_from(row.quantity).map_err(|_| LineItemError::NegativeQuantity(row.quantity))?;

        let unit_weight = match row.weight_grams {
            Some(g) if g > 0 => Weight::from_grams(g)?,
            _ => defaults.unit_weight,
        };
        let weight = unit_weight
            .checked_times(quantity)
            .ok_or_else(|| LineItemError::Overflow(row.title.clone()))?;

        let customs_code = row
            .ncm
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or(&defaults.customs_code);

        Self::new(
            customs_code,
            quantity,
            row.display_title(),
            weight,
            Money::from_cents(row.price_cents)?,
        )
    }

    pub fn customs_code(&self) -> &str {
        &self.customs_code
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn unit_value(&self) -> Money {
        self.unit_value
    }

    pub fn total_value(&self) -> Money {
        self.total_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn defaults() -> ItemDefaults {
        ItemDefaults {
            customs_code: "331090".to_string(),
            unit_weight: Weight::from_grams(500).unwrap(),
        }
    }

    fn row(quantity: i64, price_cents: i64, weight_grams: Option<i64>) -> OrderItemRow {
        OrderItemRow {
            id: Uuid::new_v4(),
            order_internal_id: None,
            order_id: None,
            title: "Body Splash".to_string(),
            variant_title: Some("200ml".to_string()),
            quantity,
            price_cents,
            weight_grams,
            ncm: None,
        }
    }

    #[test]
    fn test_total_value_is_fixed_at_construction() {
        let item = LineItem::new(
            "3304",
            3,
            "Lip gloss",
            Weight::from_grams(90).unwrap(),
            Money::from_cents(1250).unwrap(),
        )
        .unwrap();
        assert_eq!(item.total_value().cents(), 3750);
    }

    #[test]
    fn test_zero_quantity_has_zero_total() {
        let item = LineItem::new("1", 0, "x", Weight::ZERO, Money::from_cents(999).unwrap()).unwrap();
        assert_eq!(item.total_value(), Money::ZERO);
    }

    #[test]
    fn test_from_order_item_applies_fallbacks() {
        let item = LineItem::from_order_item(&row(2, 1000, None), &defaults()).unwrap();
        assert_eq!(item.customs_code(), "331090");
        assert_eq!(item.description(), "Body Splash - 200ml");
        assert_eq!(item.weight().grams(), 1000);
        assert_eq!(item.total_value().cents(), 2000);
    }

    #[test]
    fn test_zero_weight_also_falls_back() {
        let item = LineItem::from_order_item(&row(1, 100, Some(0)), &defaults()).unwrap();
        assert_eq!(item.weight().grams(), 500);
    }

    #[test]
    fn test_recorded_weight_is_multiplied_by_quantity() {
        let mut r = row(4, 100, Some(250));
        r.ncm = Some("950300".to_string());
        let item = LineItem::from_order_item(&r, &defaults()).unwrap();
        assert_eq!(item.weight().grams(), 1000);
        assert_eq!(item.customs_code(), "950300");
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let err = LineItem::from_order_item(&row(-1, 100, None), &defaults()).unwrap_err();
        assert_eq!(err, LineItemError::NegativeQuantity(-1));
    }
}
