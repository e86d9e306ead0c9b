//! Dry-Run Simulator Port (Driven Port)
//!
//! Stand-in for network calls in simulated mode. Order state is synthesized
//! locally; the simulator's internal bookkeeping is its own concern.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::StoplossError;
use crate::models::{InstrumentId, Order, OrderSide, OrderType};

/// Request to synthesize an order without contacting the exchange.
#[derive(Debug, Clone)]
pub struct SimulatedOrderRequest {
    /// Instrument to trade.
    pub instrument: InstrumentId,
    /// Order type.
    pub order_type: OrderType,
    /// Order side.
    pub side: OrderSide,
    /// Amount, already precision-rounded.
    pub amount: Decimal,
    /// Stop trigger price, already precision-rounded.
    pub stop_price: Decimal,
    /// Leverage factor the order would have been placed with.
    pub leverage: Decimal,
}

/// Port for the dry-run order simulator.
#[async_trait]
pub trait SimulatorPort: Send + Sync {
    /// Synthesize and track a new order locally.
    async fn create_simulated_order(
        &self,
        request: &SimulatedOrderRequest,
    ) -> Result<Order, StoplossError>;

    /// Return a locally tracked order by id.
    async fn fetch_simulated_order(&self, order_id: &str) -> Result<Order, StoplossError>;
}
