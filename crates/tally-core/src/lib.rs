//! # tally-core: Pure Ledger Logic for Tally
//!
//! This crate is the reconciliation core of a shared-expense tracker. It
//! contains all ledger logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Surrounding application (UI, storage, sync)            │   │
//! │  │     roster + expense drafts ──►        ◄── balances + plan      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   validation ──► allocation ──► balance ──► settlement          │   │
//! │  │   (drafts)       (equal split)  (aggregate)  (plan)             │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Participants, expense records, balances, settlements
//! - [`allocation`] - Equal split with first-consumer remainder
//! - [`balance`] - Signed balance aggregation
//! - [`settlement`] - Greedy settlement planning
//! - [`reconcile`] - Balances and plan together, shaped for display
//! - [`validation`] - Expense construction boundary
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, including ordering
//! 2. **No I/O**: apart from `tracing` events, nothing leaves the call
//! 3. **Integer Money**: all amounts are cents (i64); "settled" means `== 0`
//! 4. **Trusted Records**: aggregation never fails; invariants are checked
//!    once, in [`validation`]
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::validation::{build_expense, ExpenseDraft, PayerInput};
//! use tally_core::{reconcile, Money, Participant};
//!
//! let group = vec![
//!     Participant::new("a", "Asha"),
//!     Participant::new("b", "Bala"),
//!     Participant::new("c", "Chen"),
//! ];
//!
//! let dinner = build_expense(ExpenseDraft {
//!     description: "Dinner".to_string(),
//!     amount: Money::from_cents(10000),
//!     date: None,
//!     payer: PayerInput::Single("a".into()),
//!     consumers: group.iter().map(|p| p.id.clone()).collect(),
//! })
//! .unwrap();
//!
//! let result = reconcile(&[dinner], &group);
//! assert_eq!(result.balances["a"].cents(), 6666);
//! assert_eq!(result.settlements.len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod balance;
pub mod error;
pub mod money;
pub mod reconcile;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use allocation::{allocate, Allocation};
pub use balance::aggregate;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use reconcile::{display_name, reconcile, total_spent, BalanceLine, Reconciliation};
pub use settlement::plan;
pub use types::*;
pub use validation::{build_expense, ExpenseDraft, PayerInput, ValidationResult};
