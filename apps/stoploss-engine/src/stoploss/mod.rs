//! Stoploss order lifecycle manager.
//!
//! One stateless component with four operations sharing a single
//! retry/error-translation discipline: create, fetch (with triggered-order
//! reconciliation), cancel, and the pure trailing-adjustment decision.
//! Live vs dry-run is a capability switch selected once at construction;
//! every operation checks it first.

mod adjust;
mod cancel;
mod create;
mod fetch;

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{InstrumentId, Order, OrderSide};
use crate::ports::{AuditSink, ExchangePort, PrecisionPort, SimulatorPort, TracingAuditSink};
use crate::retry::RetryPolicy;

pub use adjust::stoploss_adjust;
pub use fetch::StopOrderState;

/// Operating mode selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Real exchange calls.
    Live,
    /// No network; order state is synthesized by the simulator.
    DryRun,
}

impl ExecutionMode {
    /// Check whether operations must avoid the transport.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun)
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "LIVE"),
            Self::DryRun => write!(f, "DRY-RUN"),
        }
    }
}

/// Execution style of a stop once its trigger price is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopExecution {
    /// Market-on-trigger: no execution price sent to the exchange.
    Market,
    /// Limit-on-trigger: an execution price derived from the trigger is sent.
    Limit,
}

/// Per-order stop configuration.
#[derive(Debug, Clone)]
pub struct StopOrderConfig {
    /// Execution style once triggered.
    pub execution: StopExecution,
    /// Ratio biasing the limit execution price to stay marketable in the
    /// stop's direction (sell: `trigger * ratio`, buy: `trigger * (2 - ratio)`).
    pub limit_ratio: Decimal,
}

impl Default for StopOrderConfig {
    fn default() -> Self {
        Self {
            execution: StopExecution::Market,
            limit_ratio: dec!(0.99),
        }
    }
}

impl StopOrderConfig {
    /// Market-on-trigger configuration.
    #[must_use]
    pub fn market() -> Self {
        Self::default()
    }

    /// Limit-on-trigger configuration with the default ratio.
    #[must_use]
    pub fn limit() -> Self {
        Self {
            execution: StopExecution::Limit,
            ..Self::default()
        }
    }

    /// Override the limit-offset ratio.
    #[must_use]
    pub const fn with_limit_ratio(mut self, limit_ratio: Decimal) -> Self {
        self.limit_ratio = limit_ratio;
        self
    }
}

/// Request to place a protective stop order.
#[derive(Debug, Clone)]
pub struct StoplossRequest {
    /// Instrument to protect.
    pub instrument: InstrumentId,
    /// Amount in caller units, rounded to lot size before submission.
    pub amount: Decimal,
    /// Raw stop trigger price, rounded to tick size before submission.
    pub stop_price: Decimal,
    /// Trade side of the stop order itself (sell protects a long).
    pub side: OrderSide,
    /// Leverage factor prepared on the exchange before submission.
    pub leverage: Decimal,
    /// Market/limit execution configuration.
    pub order_config: StopOrderConfig,
}

/// Manager configuration: mode plus per-operation retry policies.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Live or dry-run.
    pub mode: ExecutionMode,
    /// Retry policy for create. Zero retries: resubmitting a stop on an
    /// ambiguous failure risks duplicate protective orders.
    pub create_retry: RetryPolicy,
    /// Retry policy for fetch.
    pub fetch_retry: RetryPolicy,
    /// Retry policy for cancel, which is idempotent-safe to repeat.
    pub cancel_retry: RetryPolicy,
}

impl ManagerConfig {
    /// Configuration for live trading.
    #[must_use]
    pub fn live() -> Self {
        Self {
            mode: ExecutionMode::Live,
            create_retry: RetryPolicy::none(),
            fetch_retry: RetryPolicy::fetch_order(),
            cancel_retry: RetryPolicy::default(),
        }
    }

    /// Configuration for dry-run / paper trading.
    #[must_use]
    pub fn dry_run() -> Self {
        Self {
            mode: ExecutionMode::DryRun,
            ..Self::live()
        }
    }
}

/// Stoploss order lifecycle manager.
///
/// Stateless between calls: all order state lives on the exchange (or in the
/// simulator in dry-run mode), so a single instance is safe to share across
/// concurrent call sites as long as the transport is.
pub struct StoplossOrderManager<E, P, S>
where
    E: ExchangePort,
    P: PrecisionPort,
    S: SimulatorPort,
{
    exchange: Arc<E>,
    precision: Arc<P>,
    simulator: Arc<S>,
    audit: Arc<dyn AuditSink>,
    config: ManagerConfig,
}

impl<E, P, S> StoplossOrderManager<E, P, S>
where
    E: ExchangePort,
    P: PrecisionPort,
    S: SimulatorPort,
{
    /// Create a new manager with the tracing-backed audit sink.
    #[must_use]
    pub fn new(
        exchange: Arc<E>,
        precision: Arc<P>,
        simulator: Arc<S>,
        config: ManagerConfig,
    ) -> Self {
        Self {
            exchange,
            precision,
            simulator,
            audit: Arc::new(TracingAuditSink),
            config,
        }
    }

    /// Replace the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// The operating mode this manager was constructed with.
    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.config.mode
    }

    /// Whether a resting stop order needs to be moved to `new_stop`.
    ///
    /// Delegates to [`stoploss_adjust`]; pure, no I/O.
    #[must_use]
    pub fn needs_adjustment(&self, new_stop: Decimal, order: &Order, side: OrderSide) -> bool {
        stoploss_adjust(new_stop, order, side)
    }
}
