use serde::Serialize;

use crate::customs::line_item::LineItem;
use crate::customs::numeric::{Money, Weight};

/// Aggregates printed in the totals row of a declaration.
///
/// Always folded over the full item list, never a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeclarationTotals {
    pub total_weight: Weight,
    pub items_value: Money,
    pub freight: Money,
    pub insurance: Money,
    /// Goods + freight + insurance.
    pub declared_value: Money,
}

impl DeclarationTotals {
    pub fn compute(items: &[LineItem], freight: Money, insurance: Money) -> Self {
        let total_weight: Weight = items.iter().map(LineItem::weight).sum();
        let items_value: Money = items.iter().map(LineItem::total_value).sum();

        DeclarationTotals {
            total_weight,
            items_value,
            freight,
            insurance,
            declared_value: items_value + freight + insurance,
        }
    }
}
