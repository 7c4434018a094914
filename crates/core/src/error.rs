//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// guard rejections, unknown lots). Store and schema failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A required input field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A quantity was zero, negative or not a finite number.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(f64),

    /// A usage would consume more than the lot currently holds.
    #[error(
        "insufficient stock: requested {requested}, available {available} (short by {shortfall})"
    )]
    InsufficientStock {
        requested: f64,
        available: f64,
        shortfall: f64,
    },

    /// A referenced lot or record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Rejection for a usage of `requested` against `available` stock.
    ///
    /// The shortfall is reported exactly as `requested - available`.
    pub fn insufficient_stock(requested: f64, available: f64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
            shortfall: requested - available,
        }
    }

    /// The exact shortfall carried by an `InsufficientStock` rejection.
    pub fn shortfall(&self) -> Option<f64> {
        match self {
            Self::InsufficientStock { shortfall, .. } => Some(*shortfall),
            _ => None,
        }
    }
}
