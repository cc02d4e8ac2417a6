//! # Allocation Module
//!
//! Equal-split computation for a single expense.
//!
//! ## Remainder Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  allocate(100.00, [A, B, C])                                            │
//! │                                                                         │
//! │  share    = round(100.00 / 3)      = 33.33                              │
//! │  residual = 100.00 - 33.33 × 3     =  0.01                              │
//! │                                                                         │
//! │  A: 33.33 + 0.01 = 33.34   ◄── whole residual goes to the FIRST        │
//! │  B: 33.33                      consumer in input order                 │
//! │  C: 33.33                                                               │
//! │                                                                         │
//! │  Sum = 100.00 exactly                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The residual may be negative (0.05 two ways: share 0.03, first consumer
//! gets 0.02) and may exceed one cent when the per-head share rounds a long
//! way (1.00 seven ways: share 0.14, first consumer gets 0.16).
//!
//! The consumer order is part of the input. Callers must pass a stable
//! order; deriving it from an unordered collection makes the output
//! non-reproducible.

use indexmap::IndexMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::ParticipantId;

/// Share per consumer, in consumer order.
pub type Allocation = IndexMap<ParticipantId, Money>;

/// Splits `total` equally between `consumers`, rounding to the cent.
///
/// ## Example
/// ```rust
/// use tally_core::allocation::allocate;
/// use tally_core::{Money, ParticipantId};
///
/// let consumers: Vec<ParticipantId> = ["a", "b", "c"].into_iter().map(Into::into).collect();
/// let split = allocate(Money::from_cents(10000), &consumers).unwrap();
///
/// assert_eq!(split["a"].cents(), 3334);
/// assert_eq!(split["b"].cents(), 3333);
/// assert_eq!(split["c"].cents(), 3333);
/// ```
///
/// ## Errors
/// - [`CoreError::NoConsumers`] when `consumers` is empty
/// - [`ValidationError::Duplicate`] when an id appears twice
/// - [`CoreError::InvalidAmount`] when `|total|` exceeds [`Money::MAX_AMOUNT`]
pub fn allocate(total: Money, consumers: &[ParticipantId]) -> CoreResult<Allocation> {
    let Some(first) = consumers.first() else {
        return Err(CoreError::NoConsumers);
    };

    if !total.is_within_limit() {
        return Err(CoreError::InvalidAmount {
            amount: total,
            reason: format!("magnitude exceeds {}", Money::MAX_AMOUNT),
        });
    }

    let share = total.rounded_share(consumers.len());
    let mut split = Allocation::with_capacity(consumers.len());
    for id in consumers {
        if split.insert(id.clone(), share).is_some() {
            return Err(ValidationError::Duplicate {
                field: "consumer".to_string(),
                value: id.to_string(),
            }
            .into());
        }
    }

    // |total| <= MAX_AMOUNT, so share * len stays far from i64 bounds
    let residual = total - share * consumers.len() as i64;
    if !residual.is_zero() {
        if let Some(first_share) = split.get_mut(first) {
            *first_share += residual;
        }
    }

    Ok(split)
}

// =============================================================================
// Unit Tests
// =============================================================================
