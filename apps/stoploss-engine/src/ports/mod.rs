//! Port definitions for external collaborators.
//!
//! The manager only speaks to the outside world through these traits: the
//! exchange transport, precision rounding, the dry-run simulator, and the
//! audit side channel.

mod audit;
mod exchange;
mod precision;
mod simulator;

pub use audit::{AuditSink, NoOpAuditSink, TracingAuditSink};
pub use exchange::{ConditionalOrderRequest, ExchangeApiError, ExchangeOrder, ExchangePort};
pub use precision::{PrecisionPort, StepPrecision};
pub use simulator::{SimulatedOrderRequest, SimulatorPort};
