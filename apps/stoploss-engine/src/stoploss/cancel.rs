//! Stoploss order cancellation.

use serde_json::Value;

use crate::error::StoplossError;
use crate::models::{InstrumentId, OrderType};
use crate::ports::{ExchangeApiError, ExchangePort, PrecisionPort, SimulatorPort};
use crate::retry::with_retry;

use super::StoplossOrderManager;

impl<E, P, S> StoplossOrderManager<E, P, S>
where
    E: ExchangePort,
    P: PrecisionPort,
    S: SimulatorPort,
{
    /// Cancel a stop order by its logical id.
    ///
    /// A dry-run cancel is a no-op success. Live, the cancel is scoped to
    /// stop-type orders and the raw exchange acknowledgment (possibly empty)
    /// is returned. Retried on transient failures: re-canceling an already
    /// canceled or unknown order is not destructive.
    pub async fn cancel(
        &self,
        order_id: &str,
        instrument: &InstrumentId,
    ) -> Result<Value, StoplossError> {
        if self.config.mode.is_dry_run() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        with_retry(&self.config.cancel_retry, "cancel_stoploss_order", move || {
            self.cancel_live(order_id, instrument)
        })
        .await
    }

    async fn cancel_live(
        &self,
        order_id: &str,
        instrument: &InstrumentId,
    ) -> Result<Value, StoplossError> {
        let ack = self
            .exchange
            .cancel_order(order_id, instrument, Some(OrderType::Stop))
            .await
            .map_err(|err| match err {
                ExchangeApiError::InvalidOrder { message } => StoplossError::InvalidOrder {
                    message: format!("could not cancel stoploss order {order_id}: {message}"),
                },
                other => other.into(),
            })?;

        self.audit.record("cancel_stoploss_order", &ack);
        Ok(ack)
    }
}
