//! In-memory dry-run order simulator.
//!
//! Stand-in for the exchange in simulated mode: orders are synthesized with
//! locally generated ids and kept in a locked map so later fetches observe
//! them. No network calls, no trigger emulation.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::error::StoplossError;
use crate::models::{Order, OrderStatus};
use crate::ports::{SimulatedOrderRequest, SimulatorPort};

/// Dry-run simulator backed by an in-memory map.
#[derive(Debug, Default)]
pub struct InMemorySimulator {
    orders: Mutex<HashMap<String, Order>>,
}

impl InMemorySimulator {
    /// Create an empty simulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Order>> {
        self.orders
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl SimulatorPort for InMemorySimulator {
    async fn create_simulated_order(
        &self,
        request: &SimulatedOrderRequest,
    ) -> Result<Order, StoplossError> {
        let id = format!("dry_run_{}", uuid::Uuid::new_v4());
        let order = Order {
            id: id.clone(),
            order_type: request.order_type,
            side: request.side,
            amount: request.amount,
            price: Some(request.stop_price),
            stop_price: Some(request.stop_price),
            status: OrderStatus::Open,
            stop_origin_id: None,
            triggered: false,
            raw: json!({
                "dry_run": true,
                "instrument": request.instrument.as_str(),
                "leverage": request.leverage.to_string(),
            }),
        };
        self.lock().insert(id, order.clone());
        Ok(order)
    }

    async fn fetch_simulated_order(&self, order_id: &str) -> Result<Order, StoplossError> {
        self.lock()
            .get(order_id)
            .cloned()
            .ok_or_else(|| StoplossError::InvalidOrder {
                message: format!("tried to get an unknown dry-run order (id: {order_id})"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstrumentId, OrderSide, OrderType};
    use rust_decimal_macros::dec;

    fn request() -> SimulatedOrderRequest {
        SimulatedOrderRequest {
            instrument: InstrumentId::new("BTC/USD"),
            order_type: OrderType::Stop,
            side: OrderSide::Sell,
            amount: dec!(1.5),
            stop_price: dec!(100),
            leverage: dec!(3),
        }
    }

    #[tokio::test]
    async fn created_orders_are_fetchable() {
        let simulator = InMemorySimulator::new();
        let created = simulator.create_simulated_order(&request()).await.unwrap();
        assert_eq!(created.status, OrderStatus::Open);
        assert_eq!(created.stop_price, Some(dec!(100)));

        let fetched = simulator.fetch_simulated_order(&created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.amount, dec!(1.5));
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let simulator = InMemorySimulator::new();
        let a = simulator.create_simulated_order(&request()).await.unwrap();
        let b = simulator.create_simulated_order(&request()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn unknown_id_is_invalid_order() {
        let simulator = InMemorySimulator::new();
        let result = simulator.fetch_simulated_order("missing").await;
        assert!(matches!(result, Err(StoplossError::InvalidOrder { .. })));
    }
}
