//! Ledger error types for amount and month range validation.
//!
//! Lookup failures (unknown enrollment or payment) are raised by the
//! repository layer; the pure ledger service only validates inputs it
//! is handed.

use rust_decimal::Decimal;
use shulka_shared::error::AppError;
use shulka_shared::types::FeeMonth;
use thiserror::Error;

/// Errors that can occur during fee ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Amount is outside the accepted range for the operation.
    ///
    /// Payments must be strictly positive; adjusted fees must not be
    /// negative. Amounts too large for minor-unit storage are rejected
    /// the same way.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// Month range whose start sorts after its end.
    #[error("Invalid month range: {from} is after {to}")]
    InvalidRange {
        /// Requested start of the range.
        from: FeeMonth,
        /// Requested end of the range.
        to: FeeMonth,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::InvalidRange { .. } => "INVALID_RANGE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidAmount { .. } | Self::InvalidRange { .. } => 400,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}
