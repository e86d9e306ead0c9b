//! Error taxonomy for stoploss operations.
//!
//! Every transport error re-classifies into exactly one of these kinds; the
//! catch-all `Operational` variant is a deliberate mapping, not an accident.
//! All variants preserve the original exchange message for operator
//! diagnosis.
//!
//! # Propagation
//!
//! | Kind | Retried |
//! |------|---------|
//! | `InsufficientFunds` | never |
//! | `InvalidOrder` | never |
//! | `RateLimited` | with backoff, bounded |
//! | `Temporary` | with backoff, bounded |
//! | `Operational` | never (retrying unknown failures risks duplicate stops) |

use thiserror::Error;

use crate::ports::ExchangeApiError;

/// Errors surfaced by the stoploss manager.
#[derive(Debug, Clone, Error)]
pub enum StoplossError {
    /// Account cannot cover the order. Fatal to this attempt.
    #[error("insufficient funds: {message}")]
    InsufficientFunds {
        /// Original exchange message.
        message: String,
    },

    /// Parameters rejected by the exchange, or a data-integrity mismatch
    /// while resolving an order id. Fatal.
    #[error("invalid order: {message}")]
    InvalidOrder {
        /// Original exchange message or integrity description.
        message: String,
    },

    /// Exchange is throttling. Retryable.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Original exchange message.
        message: String,
    },

    /// Connectivity or exchange-side transient failure. Retryable.
    #[error("temporary exchange failure: {message}")]
    Temporary {
        /// Original exchange message.
        message: String,
    },

    /// Any other exchange-reported failure. Fatal.
    #[error("operational failure: {message}")]
    Operational {
        /// Original exchange message.
        message: String,
    },
}

impl StoplossError {
    /// Returns true if a bounded retry with backoff may resolve this error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Temporary { .. })
    }

    /// The original exchange message carried by this error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InsufficientFunds { message }
            | Self::InvalidOrder { message }
            | Self::RateLimited { message }
            | Self::Temporary { message }
            | Self::Operational { message } => message,
        }
    }
}

impl From<ExchangeApiError> for StoplossError {
    fn from(err: ExchangeApiError) -> Self {
        match err {
            ExchangeApiError::InsufficientFunds { message } => Self::InsufficientFunds { message },
            ExchangeApiError::InvalidOrder { message } => Self::InvalidOrder { message },
            ExchangeApiError::RateLimited { message } => Self::RateLimited { message },
            ExchangeApiError::Network { message } | ExchangeApiError::Exchange { message } => {
                Self::Temporary { message }
            }
            ExchangeApiError::Other { message } => Self::Operational { message },
        }
    }
}
