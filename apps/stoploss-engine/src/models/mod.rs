//! Domain model types.

mod order;

pub use order::{InstrumentId, Order, OrderSide, OrderStatus, OrderType};
