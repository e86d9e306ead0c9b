//! Trailing-stop adjustment decision.

use rust_decimal::Decimal;

use crate::models::{Order, OrderSide, OrderType};

/// Whether `new_stop` is strictly more protective than the stop currently
/// resting on the exchange.
///
/// Sell-side protective stops tighten upward (`new_stop > recorded price`),
/// buy-side stops covering a short tighten downward. Orders whose recorded
/// type is not `Stop` never signal adjustment, and a stop record without a
/// recorded price cannot be compared. Pure and total: no I/O, no errors.
#[must_use]
pub fn stoploss_adjust(new_stop: Decimal, order: &Order, side: OrderSide) -> bool {
    if order.order_type != OrderType::Stop {
        return false;
    }
    let Some(recorded) = order.price else {
        return false;
    };
    match side {
        OrderSide::Sell => new_stop > recorded,
        OrderSide::Buy => new_stop < recorded,
    }
}
