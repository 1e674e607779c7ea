//! # Error Types
//!
//! Domain-specific error types for powderbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  powderbook-core errors (this file)                                    │
//! │  ├── CostError        - Validated per-unit cost failures               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quote app errors (separate crate)                                     │
//! │  └── QuoteError       - Config, argument and file failures             │
//! │                                                                         │
//! │  Flow: ValidationError / CostError → QuoteError → stderr               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sentinels vs Errors
//! The plain calculator (`cost::calculate_per_unit`) never returns an error:
//! bad input degrades to `0` or NaN. These types back the *validated* path
//! (`cost::try_per_unit`, `validation::*`) for callers that want a reason.

use thiserror::Error;

// =============================================================================
// Cost Error
// =============================================================================

/// Errors from the validated per-unit cost path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    /// An amount (price, shipping, tax) was NaN or infinite.
    #[error("{field} is not a valid amount")]
    InvalidAmount { field: String },

    /// Quantity was zero, negative or NaN.
    ///
    /// ## User Workflow
    /// ```text
    /// Purchase: 1 box primers, qty left blank
    ///      │
    ///      ▼
    /// try_per_unit(..., qty = 0)
    ///      │
    ///      ▼
    /// NonPositiveQuantity ──► UI shows "cost unknown", not "$0.000"
    /// ```
    #[error("Quantity must be greater than zero to compute a per-unit cost")]
    NonPositiveQuantity,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before records reach the calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Invalid format (e.g., invalid UUID, unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CostError.
pub type CoreResult<T> = Result<T, CostError>;

// =============================================================================
// Unit Tests
// =============================================================================
