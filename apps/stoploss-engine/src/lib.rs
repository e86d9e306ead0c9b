// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Stoploss Engine - Core Library
//!
//! Stoploss-order lifecycle manager layered over a remote exchange API.
//! The exchange represents a triggered stop as two records (the conditional
//! order and the resulting market/limit order); this crate reconciles them
//! into one logical order, and wraps create/fetch/cancel in a shared
//! retry/error-translation discipline.
//!
//! # Layout
//!
//! - `models`: normalized order entity and enums
//! - `ports`: traits for the external collaborators (exchange transport,
//!   precision rounding, dry-run simulator, audit sink)
//! - `error`: the closed failure taxonomy every transport error maps into
//! - `retry`: bounded-attempt exponential backoff
//! - `stoploss`: the manager itself plus the pure adjustment decision
//! - `simulator`: in-memory dry-run implementation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Failure taxonomy for stoploss operations.
pub mod error;

/// Domain model types.
pub mod models;

/// Ports for external collaborators.
pub mod ports;

/// Bounded-attempt retry with exponential backoff.
pub mod retry;

/// In-memory dry-run simulator.
pub mod simulator;

/// The stoploss order lifecycle manager.
pub mod stoploss;

pub use error::StoplossError;
pub use models::{InstrumentId, Order, OrderSide, OrderStatus, OrderType};
pub use ports::{
    AuditSink, ConditionalOrderRequest, ExchangeApiError, ExchangeOrder, ExchangePort,
    NoOpAuditSink, PrecisionPort, SimulatedOrderRequest, SimulatorPort, StepPrecision,
    TracingAuditSink,
};
pub use retry::{DEFAULT_RETRY_COUNT, FETCH_ORDER_RETRY_COUNT, RetryPolicy, with_retry};
pub use simulator::InMemorySimulator;
pub use stoploss::{
    ExecutionMode, ManagerConfig, StopExecution, StopOrderConfig, StopOrderState,
    StoplossOrderManager, StoplossRequest, stoploss_adjust,
};
