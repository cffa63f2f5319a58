//! Order status catalogue and transition checks.
//!
//! `status_logistico` holds either a generic lower-case status or one of the
//! upper-case logistics milestones written by the fulfilment pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "processing")]
    Processing,
    #[serde(rename = "shipped")]
    Shipped,
    #[serde(rename = "delivered")]
    Delivered,
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "AGUARDANDO_LOGISTICA")]
    AwaitingLogistics,
    #[serde(rename = "TRACKING_ASSOCIADO")]
    TrackingAssociated,
    #[serde(rename = "AGUARDANDO_EMBARQUE")]
    AwaitingShipment,
}

/// Portuguese gloss shown in the status badge tooltip.
#[derive(Debug, Clone, Serialize)]
pub struct StatusTranslation {
    pub en: &'static str,
    pub pt: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusInfo {
    pub value: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub translation: Option<StatusTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("unknown order status '{0}'")]
    Unknown(String),

    #[error("order is already {}", .0.as_str())]
    Unchanged(OrderStatus),
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::AwaitingLogistics,
        OrderStatus::TrackingAssociated,
        OrderStatus::AwaitingShipment,
    ];

    /// Value as persisted in `status_logistico`.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::AwaitingLogistics => "AGUARDANDO_LOGISTICA",
            OrderStatus::TrackingAssociated => "TRACKING_ASSOCIADO",
            OrderStatus::AwaitingShipment => "AGUARDANDO_EMBARQUE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::AwaitingLogistics => "Awaiting Logistics",
            OrderStatus::TrackingAssociated => "Tracking Associated",
            OrderStatus::AwaitingShipment => "Await Shipment",
        }
    }

    /// Tailwind badge class used by the order table.
    pub fn color(self) -> &'static str {
        match self {
            OrderStatus::Pending => "bg-yellow-500",
            OrderStatus::Processing => "bg-blue-500",
            OrderStatus::Shipped => "bg-purple-500",
            OrderStatus::Delivered => "bg-green-500",
            OrderStatus::Cancelled => "bg-red-500",
            OrderStatus::AwaitingLogistics => "bg-teal-500",
            OrderStatus::TrackingAssociated => "bg-indigo-500",
            OrderStatus::AwaitingShipment => "bg-orange-500",
        }
    }

    pub fn translation(self) -> Option<StatusTranslation> {
        let (en, description) = match self {
            OrderStatus::AwaitingLogistics => (
                "Awaiting Logistics",
                "Pedido criado, aguardando criação de remessa",
            ),
            OrderStatus::TrackingAssociated => {
                ("Tracking Associated", "Tracking number associado")
            }
            OrderStatus::AwaitingShipment => (
                "Awaiting Shipment",
                "CN35 e CN38 criados, aguardando embarque",
            ),
            _ => return None,
        };
        Some(StatusTranslation {
            en,
            pt: self.as_str(),
            description,
        })
    }

    pub fn info(self) -> StatusInfo {
        StatusInfo {
            value: self.as_str(),
            label: self.label(),
            color: self.color(),
            translation: self.translation(),
        }
    }

    /// Accepts the persisted form or its normalized lower-kebab form
    /// (`"aguardando-logistica"`).
    pub fn parse(raw: &str) -> Result<Self, StatusError> {
        let raw = raw.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|s| s.as_str() == raw || normalize_status(s.as_str()) == raw)
            .ok_or_else(|| StatusError::Unknown(raw.to_string()))
    }

    /// Validates a requested change from the current persisted value.
    ///
    /// Any known status may follow any other; setting the status it already
    /// has is refused so the operator gets feedback instead of a silent no-op.
    pub fn transition(current: &str, requested: &str) -> Result<OrderStatus, StatusError> {
        let next = OrderStatus::parse(requested)?;
        match OrderStatus::parse(current) {
            Ok(cur) if cur == next => Err(StatusError::Unchanged(next)),
            _ => Ok(next),
        }
    }
}

/// Lower-case, `_` → `-`; empty becomes `"pending"`.
pub fn normalize_status(raw: &str) -> String {
    let normalized = raw.trim().to_lowercase().replace('_', "-");
    if normalized.is_empty() {
        OrderStatus::Pending.as_str().to_string()
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_forms() {
        assert_eq!(
            OrderStatus::parse("TRACKING_ASSOCIADO").unwrap(),
            OrderStatus::TrackingAssociated
        );
        assert_eq!(
            OrderStatus::parse("tracking-associado").unwrap(),
            OrderStatus::TrackingAssociated
        );
        assert_eq!(OrderStatus::parse("shipped").unwrap(), OrderStatus::Shipped);
        assert!(matches!(
            OrderStatus::parse("lost"),
            Err(StatusError::Unknown(_))
        ));
    }

    #[test]
    fn test_transition_rejects_same_status() {
        let err = OrderStatus::transition("AGUARDANDO_EMBARQUE", "AGUARDANDO_EMBARQUE").unwrap_err();
        assert_eq!(err, StatusError::Unchanged(OrderStatus::AwaitingShipment));
    }

    #[test]
    fn test_transition_from_unknown_current_is_allowed() {
        assert_eq!(
            OrderStatus::transition("", "processing").unwrap(),
            OrderStatus::Processing
        );
        assert_eq!(
            OrderStatus::transition("LEGACY_VALUE", "shipped").unwrap(),
            OrderStatus::Shipped
        );
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status("AGUARDANDO_LOGISTICA"), "aguardando-logistica");
        assert_eq!(normalize_status(""), "pending");
    }

    #[test]
    fn test_only_logistics_statuses_are_translated() {
        let translated: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(|s| s.translation().is_some())
            .collect();
        assert_eq!(translated.len(), 3);
        assert_eq!(
            OrderStatus::AwaitingShipment.translation().unwrap().pt,
            "AGUARDANDO_EMBARQUE"
        );
    }

    #[test]
    fn test_serde_uses_persisted_value() {
        let json = serde_json::to_string(&OrderStatus::AwaitingLogistics).unwrap();
        assert_eq!(json, "\"AGUARDANDO_LOGISTICA\"");
    }
}
