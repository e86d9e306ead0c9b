//! Stoploss order fetch with triggered-order reconciliation.
//!
//! Once a stop triggers, the exchange keeps two records: the conditional
//! order (now closed) and the resulting market/limit order it spawned. The
//! reconciliation here joins them back into one logical order so callers
//! never see the split representation.

use serde_json::Value;

use crate::error::StoplossError;
use crate::models::{InstrumentId, Order, OrderStatus, OrderType};
use crate::ports::{ExchangeOrder, ExchangePort, PrecisionPort, SimulatorPort};
use crate::retry::with_retry;

use super::StoplossOrderManager;

/// Resolution of a stop order's exchange-side state.
#[derive(Debug, Clone)]
pub enum StopOrderState {
    /// The conditional order is still resting.
    Open(ExchangeOrder),
    /// The stop has fired; the exchange now reports the resulting order.
    Triggered {
        /// Id the stop order was created under (what callers query by).
        logical_id: String,
        /// The resulting market/limit order record.
        resulting: ExchangeOrder,
    },
}

impl StopOrderState {
    /// Collapse into the normalized caller-facing shape.
    ///
    /// For a triggered stop the returned order keeps the logical id at the
    /// top level, carries the resulting order's id as `stop_origin_id`,
    /// forces the type back to `Stop`, and sets the triggered marker.
    #[must_use]
    pub fn into_order(self) -> Order {
        match self {
            Self::Open(record) => record.into_order(),
            Self::Triggered {
                logical_id,
                resulting,
            } => {
                let origin_id = resulting.id.clone();
                let mut order = resulting.into_order();
                order.stop_origin_id = Some(origin_id);
                order.id = logical_id;
                order.order_type = OrderType::Stop;
                order.triggered = true;
                order
            }
        }
    }
}

impl<E, P, S> StoplossOrderManager<E, P, S>
where
    E: ExchangePort,
    P: PrecisionPort,
    S: SimulatorPort,
{
    /// Fetch a stop order by its logical id.
    ///
    /// The id must resolve to exactly one stop-type order on the instrument;
    /// zero or multiple matches is a data-integrity failure surfaced as
    /// `InvalidOrder`, never retried. A closed (triggered) match is joined
    /// with its resulting order before being returned.
    pub async fn fetch(
        &self,
        order_id: &str,
        instrument: &InstrumentId,
    ) -> Result<Order, StoplossError> {
        if self.config.mode.is_dry_run() {
            return self.simulator.fetch_simulated_order(order_id).await;
        }

        with_retry(&self.config.fetch_retry, "fetch_stoploss_order", move || {
            self.fetch_live(order_id, instrument)
        })
        .await
    }

    async fn fetch_live(
        &self,
        order_id: &str,
        instrument: &InstrumentId,
    ) -> Result<Order, StoplossError> {
        let orders = self
            .exchange
            .fetch_orders(instrument, None, Some(OrderType::Stop))
            .await
            .map_err(StoplossError::from)?;

        let mut matches: Vec<ExchangeOrder> =
            orders.into_iter().filter(|o| o.id == order_id).collect();
        self.audit.record(
            "fetch_stoploss_order",
            &serde_json::to_value(&matches).unwrap_or(Value::Null),
        );

        if matches.len() != 1 {
            return Err(StoplossError::InvalidOrder {
                message: format!(
                    "could not get stoploss order for id {order_id} on {instrument} ({count} matches)",
                    count = matches.len(),
                ),
            });
        }
        let conditional = matches.remove(0);

        let state = if conditional.status == OrderStatus::Closed {
            // Trigger order was triggered; join in the resulting order.
            let resulting_id = conditional
                .info
                .get("orderId")
                .and_then(Value::as_str)
                .ok_or_else(|| StoplossError::InvalidOrder {
                    message: format!(
                        "triggered stoploss order {order_id} carries no resulting order reference"
                    ),
                })?;

            let resulting = self
                .exchange
                .fetch_order(resulting_id, instrument)
                .await
                .map_err(StoplossError::from)?;
            self.audit.record(
                "fetch_stoploss_order_result",
                &serde_json::to_value(&resulting).unwrap_or(Value::Null),
            );

            StopOrderState::Triggered {
                logical_id: conditional.id,
                resulting,
            }
        } else {
            StopOrderState::Open(conditional)
        };

        Ok(state.into_order())
    }
}
