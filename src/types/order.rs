use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a broker order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Placed,
    Partial,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// True once the order can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }
}

/// An order sent to the broker for a detected signal.
///
/// Order placement itself lives with the broker client; this type fixes the
/// serialization contract the cache and API share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub symbol: String,
    pub entry_price: f64,
    pub quantity: u32,
    pub target_price: f64,
    pub stop_loss_price: f64,
    pub status: OrderStatus,
    pub placed_timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled_quantity: Option<u32>,
}

impl Order {
    /// Cache key for this order.
    pub fn cache_key(&self) -> String {
        format!("order:{}", self.order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Placed).unwrap(),
            "\"placed\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_status_roundtrip() {
        let status: OrderStatus = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(status, OrderStatus::Partial);
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Partial.is_terminal());
    }

    #[test]
    fn test_order_cache_key() {
        let order = Order {
            order_id: "ORD123456".to_string(),
            symbol: "NSE:INFY".to_string(),
            entry_price: 1500.0,
            quantity: 10,
            target_price: 1560.0,
            stop_loss_price: 1470.0,
            status: OrderStatus::Placed,
            placed_timestamp: Utc::now(),
            filled_timestamp: None,
            filled_price: None,
            filled_quantity: None,
        };
        assert_eq!(order.cache_key(), "order:ORD123456");
    }
}
