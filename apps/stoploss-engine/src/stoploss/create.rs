//! Stoploss order creation.

use rust_decimal::Decimal;

use crate::error::StoplossError;
use crate::models::{Order, OrderSide, OrderType};
use crate::ports::{
    ConditionalOrderRequest, ExchangeApiError, ExchangePort, PrecisionPort, SimulatedOrderRequest,
    SimulatorPort,
};
use crate::retry::with_retry;

use super::{StopExecution, StoplossRequest, StoplossOrderManager};

/// Execution limit price for a limit-on-trigger stop.
///
/// Biased to remain marketable in the stop's direction: a sell stop limits
/// slightly below its trigger, a buy stop slightly above.
#[must_use]
pub(super) fn stop_limit_rate(stop_price: Decimal, limit_ratio: Decimal, side: OrderSide) -> Decimal {
    match side {
        OrderSide::Sell => stop_price * limit_ratio,
        OrderSide::Buy => stop_price * (Decimal::TWO - limit_ratio),
    }
}

impl<E, P, S> StoplossOrderManager<E, P, S>
where
    E: ExchangePort,
    P: PrecisionPort,
    S: SimulatorPort,
{
    /// Place a protective stop order.
    ///
    /// The trigger price and amount are rounded to the instrument's
    /// precision first. In dry-run mode the order is synthesized locally;
    /// live, leverage is prepared and a conditional order submitted, with an
    /// execution price attached only for limit-on-trigger stops. This call
    /// never retries: a resubmit after an ambiguous failure could leave two
    /// protective orders resting.
    pub async fn create(&self, request: &StoplossRequest) -> Result<Order, StoplossError> {
        let limit_rate = stop_limit_rate(
            request.stop_price,
            request.order_config.limit_ratio,
            request.side,
        );
        let stop_price = self
            .precision
            .price_to_precision(&request.instrument, request.stop_price);
        let amount = self
            .precision
            .amount_to_precision(&request.instrument, request.amount);

        if self.config.mode.is_dry_run() {
            let simulated = SimulatedOrderRequest {
                instrument: request.instrument.clone(),
                order_type: OrderType::Stop,
                side: request.side,
                amount,
                stop_price,
                leverage: request.leverage,
            };
            return self.simulator.create_simulated_order(&simulated).await;
        }

        with_retry(&self.config.create_retry, "create_stoploss_order", move || {
            self.create_live(request, amount, stop_price, limit_rate)
        })
        .await
    }

    async fn create_live(
        &self,
        request: &StoplossRequest,
        amount: Decimal,
        stop_price: Decimal,
        limit_rate: Decimal,
    ) -> Result<Order, StoplossError> {
        self.exchange
            .prepare_leverage(&request.instrument, request.leverage)
            .await
            .map_err(StoplossError::from)?;

        let execution_price = match request.order_config.execution {
            StopExecution::Limit => Some(limit_rate),
            StopExecution::Market => None,
        };
        let order_request = ConditionalOrderRequest {
            instrument: request.instrument.clone(),
            order_type: OrderType::Stop,
            side: request.side,
            amount,
            stop_price,
            execution_price,
        };

        let ack = self
            .exchange
            .create_order(&order_request)
            .await
            .map_err(|err| classify_create_error(err, request, amount, stop_price))?;

        self.audit.record(
            "create_stoploss_order",
            &serde_json::to_value(&ack).unwrap_or(serde_json::Value::Null),
        );
        tracing::info!(
            instrument = %request.instrument,
            side = %request.side,
            stop_price = %stop_price,
            order_id = %ack.id,
            "stoploss order added"
        );

        Ok(ack.into_order())
    }
}

/// Re-classify a create failure, adding order context to the fatal kinds the
/// operator will act on.
fn classify_create_error(
    err: ExchangeApiError,
    request: &StoplossRequest,
    amount: Decimal,
    stop_price: Decimal,
) -> StoplossError {
    match err {
        ExchangeApiError::InsufficientFunds { message } => StoplossError::InsufficientFunds {
            message: format!(
                "creating stop {side} order on {instrument} with amount {amount} at stop {stop_price}: {message}",
                side = request.side,
                instrument = request.instrument,
            ),
        },
        ExchangeApiError::InvalidOrder { message } => StoplossError::InvalidOrder {
            message: format!(
                "could not create stop {side} order on {instrument} with amount {amount} at stop {stop_price}: {message}",
                side = request.side,
                instrument = request.instrument,
            ),
        },
        other => other.into(),
    }
}
