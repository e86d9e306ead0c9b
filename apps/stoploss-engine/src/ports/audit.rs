//! Audit Sink (Driven Port)
//!
//! Side channel receiving the raw exchange response for each state-changing
//! call. Best-effort: a sink must never fail or alter control flow.

use serde_json::Value;

/// Sink for raw exchange responses.
pub trait AuditSink: Send + Sync {
    /// Record the raw payload returned by the exchange for `operation`.
    fn record(&self, operation: &str, payload: &Value);
}

/// Audit sink that emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, operation: &str, payload: &Value) {
        tracing::debug!(target: "stoploss_engine::audit", operation, payload = %payload, "exchange response");
    }
}

/// Audit sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuditSink;

impl AuditSink for NoOpAuditSink {
    fn record(&self, _operation: &str, _payload: &Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sinks_accept_any_payload() {
        TracingAuditSink.record("create_stoploss_order", &json!({"id": "1"}));
        NoOpAuditSink.record("cancel_stoploss_order", &Value::Null);
    }
}
