//! Precision Port (Driven Port)
//!
//! Exchange-mandated quantization of prices and amounts. Pure functions,
//! no I/O; the rounding rules belong to the exchange integration.

use rust_decimal::Decimal;

use crate::models::InstrumentId;

/// Port for exchange-specific price/amount rounding.
pub trait PrecisionPort: Send + Sync {
    /// Round a price to the instrument's permitted tick size.
    fn price_to_precision(&self, instrument: &InstrumentId, price: Decimal) -> Decimal;

    /// Round an amount to the instrument's permitted lot size.
    fn amount_to_precision(&self, instrument: &InstrumentId, amount: Decimal) -> Decimal;
}

/// Tick/lot quantizer using fixed step sizes.
///
/// Rounds toward zero so a rounded stop never crosses its own trigger and a
/// rounded amount never exceeds what the caller sized.
#[derive(Debug, Clone)]
pub struct StepPrecision {
    /// Price tick size.
    pub tick: Decimal,
    /// Amount lot size.
    pub lot: Decimal,
}

impl StepPrecision {
    /// Create a quantizer from tick and lot sizes.
    #[must_use]
    pub const fn new(tick: Decimal, lot: Decimal) -> Self {
        Self { tick, lot }
    }

    fn quantize(value: Decimal, step: Decimal) -> Decimal {
        if step.is_zero() {
            return value;
        }
        (value / step).trunc() * step
    }
}

impl PrecisionPort for StepPrecision {
    fn price_to_precision(&self, _instrument: &InstrumentId, price: Decimal) -> Decimal {
        Self::quantize(price, self.tick)
    }

    fn amount_to_precision(&self, _instrument: &InstrumentId, amount: Decimal) -> Decimal {
        Self::quantize(amount, self.lot)
    }
}
