//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Allocation failures                            │
//! │  └── ValidationError  - Expense construction failures                  │
//! │                                                                         │
//! │  tally-cli errors (separate crate)                                     │
//! │  └── CliError         - File, config and usage failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aggregation and settlement planning have no error type at all: they are
//! total functions. A ledger whose payer amounts do not match its totals
//! still aggregates; it just yields balances that do not sum to zero.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core ledger errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An equal split was requested with nobody to split between.
    #[error("Cannot split an amount between zero consumers")]
    NoConsumers,

    /// An amount outside what the operation accepts.
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: Money, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Expense and roster validation errors.
///
/// Raised at the construction boundary, before records reach the
/// aggregator.
#[derive(Debug, Error, PartialEq, Eq)]
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

    /// Value exceeds [`Money::MAX_AMOUNT`].
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: Money },

    /// Invalid format (e.g., unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same consumer listed twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Multi-payer contributions do not add up to the expense amount.
    ///
    /// ## User Workflow
    /// ```text
    /// Expense: Dinner 100.00
    /// Payers:  Asha 60.00, Bala 30.00
    ///      │
    ///      ▼
    /// PayerTotalMismatch { paid: 90.00, amount: 100.00 }
    ///      │
    ///      ▼
    /// UI shows: "Total paid (90.00) must equal expense amount (100.00)"
    /// ```
    #[error("Total paid ({paid}) must equal expense amount ({amount})")]
    PayerTotalMismatch { paid: Money, amount: Money },

    /// Multi-payer mode with every contribution zero.
    #[error("At least one payer must contribute")]
    NoPayers,

    /// Nobody selected to share the expense.
    #[error("At least one consumer must share the expense")]
    NoConsumers,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
