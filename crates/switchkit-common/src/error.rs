//! Error types for Switchkit
//!
//! Provides a unified error type and domain-specific error variants.
//! Eligibility verdicts are result data and never show up here.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using SwitchkitError
pub type Result<T> = std::result::Result<T, SwitchkitError>;

/// Unified error type for Switchkit operations
#[derive(Debug, Error)]
pub enum SwitchkitError {
    // Arithmetic errors
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    // Quote errors
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SwitchkitError {
    /// True when the error only means a derived figure is unavailable
    ///
    /// Callers hide the dependent display instead of surfacing these.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SwitchkitError::Math(MathError::DivisionByZero { .. }))
    }
}

/// Arithmetic errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    #[error("Decimal overflow in {operation}")]
    Overflow { operation: &'static str },
}

/// Quote and input validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    #[error("Invalid slippage {slippage}: must be in [0, 1)")]
    InvalidSlippage { slippage: Decimal },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Not enough reserves to form a pair: {available} available")]
    NotEnoughReserves { available: usize },
}

// Implement From for common external error types
impl From<serde_json::Error> for SwitchkitError {
    fn from(err: serde_json::Error) -> Self {
        SwitchkitError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for SwitchkitError {
    fn from(err: anyhow::Error) -> Self {
        SwitchkitError::Internal(err.to_string())
    }
}
