//! Exchange Port (Driven Port)
//!
//! Interface to the remote exchange transport. The transport owns HTTP /
//! WebSocket plumbing, authentication, and timeouts; this crate only sees
//! the classified results defined here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{InstrumentId, Order, OrderSide, OrderStatus, OrderType};

/// Request to submit a conditional stop order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalOrderRequest {
    /// Instrument to trade.
    pub instrument: InstrumentId,
    /// Order type as submitted to the exchange (always `Stop` here).
    pub order_type: OrderType,
    /// Order side.
    pub side: OrderSide,
    /// Amount, already rounded to the instrument's lot size.
    pub amount: Decimal,
    /// Trigger price, already rounded to the instrument's tick size.
    pub stop_price: Decimal,
    /// Execution price once triggered. Present only for limit-on-trigger
    /// stops; the exchange treats an absent price as market-on-trigger.
    pub execution_price: Option<Decimal>,
}

/// An order record as the exchange transport reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeOrder {
    /// Exchange-assigned order id.
    pub id: String,
    /// Order type.
    pub order_type: OrderType,
    /// Order side.
    pub side: OrderSide,
    /// Amount.
    pub amount: Decimal,
    /// Execution price, if reported.
    pub price: Option<Decimal>,
    /// Stop trigger price, if any.
    pub stop_price: Option<Decimal>,
    /// Reported status.
    pub status: OrderStatus,
    /// Raw exchange payload. For a triggered conditional order this carries
    /// the resulting order's id under `orderId`.
    pub info: serde_json::Value,
}

impl ExchangeOrder {
    /// Normalize into the caller-facing [`Order`] shape.
    #[must_use]
    pub fn into_order(self) -> Order {
        Order {
            id: self.id,
            order_type: self.order_type,
            side: self.side,
            amount: self.amount,
            price: self.price,
            stop_price: self.stop_price,
            status: self.status,
            stop_origin_id: None,
            triggered: false,
            raw: self.info,
        }
    }
}

/// Transport-classified errors.
///
/// Every failure the transport can report maps onto exactly one of these
/// variants; the crate's own taxonomy is derived from them in
/// [`crate::error::StoplossError`].
#[derive(Debug, Clone, Error)]
pub enum ExchangeApiError {
    /// Account cannot cover the order.
    #[error("insufficient funds: {message}")]
    InsufficientFunds {
        /// Original exchange message.
        message: String,
    },

    /// Order parameters rejected by the exchange.
    #[error("invalid order: {message}")]
    InvalidOrder {
        /// Original exchange message.
        message: String,
    },

    /// Exchange is throttling (rate limit / DDoS protection).
    #[error("rate limited: {message}")]
    RateLimited {
        /// Original exchange message.
        message: String,
    },

    /// Connectivity failure between us and the exchange.
    #[error("network error: {message}")]
    Network {
        /// Original transport message.
        message: String,
    },

    /// Exchange-side transient failure.
    #[error("exchange error: {message}")]
    Exchange {
        /// Original exchange message.
        message: String,
    },

    /// Anything else the transport could not classify.
    #[error("{message}")]
    Other {
        /// Original message.
        message: String,
    },
}

/// Port for exchange interactions used by the stoploss manager.
#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// Submit a conditional order.
    async fn create_order(
        &self,
        request: &ConditionalOrderRequest,
    ) -> Result<ExchangeOrder, ExchangeApiError>;

    /// Fetch orders on an instrument, optionally scoped by order type.
    async fn fetch_orders(
        &self,
        instrument: &InstrumentId,
        since: Option<DateTime<Utc>>,
        order_type: Option<OrderType>,
    ) -> Result<Vec<ExchangeOrder>, ExchangeApiError>;

    /// Fetch a single order by exchange id.
    async fn fetch_order(
        &self,
        order_id: &str,
        instrument: &InstrumentId,
    ) -> Result<ExchangeOrder, ExchangeApiError>;

    /// Cancel an order, optionally scoped by order type.
    ///
    /// Returns the raw exchange acknowledgment, which may be empty.
    async fn cancel_order(
        &self,
        order_id: &str,
        instrument: &InstrumentId,
        order_type: Option<OrderType>,
    ) -> Result<serde_json::Value, ExchangeApiError>;

    /// Configure leverage/margin mode before order submission.
    async fn prepare_leverage(
        &self,
        instrument: &InstrumentId,
        leverage: Decimal,
    ) -> Result<(), ExchangeApiError>;
}
