//! Normalized order types shared across the crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl OrderSide {
    /// Exchange wire string for this side.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order type as the exchange classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Market order - execute at best available price.
    Market,
    /// Limit order - execute at specified price or better.
    Limit,
    /// Conditional stop order - parks until the trigger price is crossed.
    Stop,
}

impl OrderType {
    /// Exchange wire string for this order type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::Stop => "stop",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order status as reported by the exchange for the conditional leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order is resting on the exchange.
    Open,
    /// Order is closed. For a conditional stop this means it has triggered.
    Closed,
    /// Order was canceled.
    Canceled,
}

impl OrderStatus {
    /// Returns true if the order can still trigger or fill.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Canceled)
    }
}

/// Identifier for a tradeable instrument (exchange market symbol).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Create a new identifier from a string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for InstrumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A normalized order as presented to callers.
///
/// For stop orders the exchange keeps two records once the trigger price is
/// crossed: the original conditional order and the resulting market/limit
/// order it spawned. This type always presents the pair as one logical order:
/// `id` stays the conditional order's id, `stop_origin_id` carries the
/// resulting order's id, and `triggered` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Logical order id. For a triggered stop this remains the id the stop
    /// was created under, so callers can always re-query with it.
    pub id: String,
    /// Order type. Forced back to `Stop` for reconciled triggered stops.
    pub order_type: OrderType,
    /// Order side.
    pub side: OrderSide,
    /// Order amount in base units.
    pub amount: Decimal,
    /// Execution price, if the exchange reported one.
    pub price: Option<Decimal>,
    /// Stop trigger price, if any.
    pub stop_price: Option<Decimal>,
    /// Status of the record the exchange most recently reported.
    pub status: OrderStatus,
    /// Exchange id of the resulting order spawned when the stop triggered.
    pub stop_origin_id: Option<String>,
    /// Set once the stop has fired and the record was reconciled.
    pub triggered: bool,
    /// Opaque exchange payload, preserved for downstream consumers.
    pub raw: serde_json::Value,
}

impl Order {
    /// The identifier a caller should use to refer to this order from now on.
    ///
    /// Stop orders prefer the resulting order's id (`stop_origin_id`) when
    /// the stop has triggered, falling back to the logical id. All other
    /// order types keep their own id.
    #[must_use]
    pub fn tracking_id(&self) -> &str {
        match (self.order_type, self.stop_origin_id.as_deref()) {
            (OrderType::Stop, Some(origin)) => origin,
            _ => &self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stop_order(stop_origin_id: Option<&str>) -> Order {
        Order {
            id: "A".to_string(),
            order_type: OrderType::Stop,
            side: OrderSide::Sell,
            amount: dec!(1),
            price: Some(dec!(100)),
            stop_price: Some(dec!(100)),
            status: OrderStatus::Open,
            stop_origin_id: stop_origin_id.map(str::to_string),
            triggered: stop_origin_id.is_some(),
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn tracking_id_prefers_stop_origin_for_stops() {
        let order = stop_order(Some("B"));
        assert_eq!(order.tracking_id(), "B");
    }

    #[test]
    fn tracking_id_falls_back_to_logical_id() {
        let order = stop_order(None);
        assert_eq!(order.tracking_id(), "A");
    }

    #[test]
    fn tracking_id_ignores_origin_for_non_stop_orders() {
        let mut order = stop_order(Some("B"));
        order.id = "C".to_string();
        order.order_type = OrderType::Market;
        assert_eq!(order.tracking_id(), "C");
    }

    #[test]
    fn status_helpers() {
        assert!(OrderStatus::Open.is_open());
        assert!(!OrderStatus::Open.is_terminal());
        assert!(OrderStatus::Closed.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
    }

    #[test]
    fn wire_strings() {
        assert_eq!(OrderSide::Sell.as_str(), "sell");
        assert_eq!(OrderType::Stop.as_str(), "stop");
        assert_eq!(format!("{}", OrderType::Limit), "limit");
    }

    #[test]
    fn instrument_id_roundtrip() {
        let id = InstrumentId::new("BTC/USD");
        assert_eq!(id.as_str(), "BTC/USD");
        assert_eq!(format!("{id}"), "BTC/USD");
    }
}
