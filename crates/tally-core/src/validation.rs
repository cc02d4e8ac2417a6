//! # Validation Module
//!
//! The expense construction boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Invariants Are Enforced                      │
//! │                                                                         │
//! │  Layer 1: Input form / ledger file                                     │
//! │  ├── Raw strings, user-chosen payer mode                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (build_expense)                                  │
//! │  ├── description, amount > 0                                           │
//! │  ├── payer contributions sum to amount                                 │
//! │  └── consumers non-empty and unique → equal split                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: aggregate / plan                                             │
//! │  └── trusts every ExpenseRecord, never fails                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{build_expense, ExpenseDraft, PayerInput};
//! use tally_core::Money;
//!
//! let draft = ExpenseDraft {
//!     description: "Dinner".to_string(),
//!     amount: Money::from_cents(10000),
//!     date: None,
//!     payer: PayerInput::Single("a".into()),
//!     consumers: vec!["a".into(), "b".into(), "c".into()],
//! };
//!
//! let expense = build_expense(draft).unwrap();
//! assert_eq!(expense.split_between()["a"].cents(), 3334);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::allocation::allocate;
use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::types::{ExpenseRecord, Participant, ParticipantId, ShareMap};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted expense description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

// =============================================================================
// Expense Draft
// =============================================================================

/// How an expense was paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PayerInput {
    /// One participant paid the full amount.
    Single(ParticipantId),
    /// Several participants each paid part of it.
    Multiple(ShareMap),
}

/// An expense as entered, before any invariant has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Money,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    pub payer: PayerInput,
    /// Consumers in the order the remainder rule should see them.
    pub consumers: Vec<ParticipantId>,
}

/// Validates a draft and builds the equal-split expense record.
///
/// ## Rules
/// - Description must be non-empty and at most 200 characters
/// - Amount must be positive and at most [`Money::MAX_AMOUNT`]
/// - Multiple payers: no negative or oversized contribution, zero entries dropped,
///   at least one payer left, contributions sum exactly to the amount
/// - Consumers must be non-empty and unique
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Add Expense                                                            │
/// │                                                                         │
/// │  "Cab", 60.00, paid by {a: 20, b: 40}, shared by [a, b, c]             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  build_expense(draft) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── 20 + 40 != 60? → PayerTotalMismatch                          │
/// │       │                                                                 │
/// │       └── OK → ExpenseRecord { split_between: {a: 20, b: 20, c: 20} }  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn build_expense(draft: ExpenseDraft) -> ValidationResult<ExpenseRecord> {
    validate_description(&draft.description)?;
    validate_amount(draft.amount)?;

    let paid_by = match draft.payer {
        PayerInput::Single(payer) => {
            validate_participant_id(&payer)?;
            ShareMap::from_iter([(payer, draft.amount)])
        }
        PayerInput::Multiple(contributions) => validate_payers(contributions, draft.amount)?,
    };

    for consumer in &draft.consumers {
        validate_participant_id(consumer)?;
    }
    let split_between = allocate(draft.amount, &draft.consumers).map_err(|err| match err {
        CoreError::NoConsumers => ValidationError::NoConsumers,
        CoreError::Validation(inner) => inner,
        CoreError::InvalidAmount { .. } => ValidationError::TooLarge {
            field: "amount".to_string(),
            max: Money::MAX_AMOUNT,
        },
    })?;

    let mut expense = ExpenseRecord::new(draft.amount, paid_by, split_between)
        .with_description(draft.description.trim());
    if let Some(date) = draft.date {
        expense = expense.with_date(date);
    }
    Ok(expense)
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an expense description.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_description;
///
/// assert!(validate_description("Groceries").is_ok());
/// assert!(validate_description("   ").is_err());
/// ```
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates an expense amount. Must be positive and at most
/// [`Money::MAX_AMOUNT`].
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if !amount.is_within_limit() {
        return Err(ValidationError::TooLarge {
            field: "amount".to_string(),
            max: Money::MAX_AMOUNT,
        });
    }

    Ok(())
}

/// Validates a participant identifier. Must not be blank.
pub fn validate_participant_id(id: &ParticipantId) -> ValidationResult<()> {
    if id.as_str().trim().is_empty() {
        return Err(ValidationError::Required {
            field: "participant id".to_string(),
        });
    }

    Ok(())
}

/// Checks multi-payer contributions against the expense amount and
/// returns only the payers who actually paid something.
pub fn validate_payers(contributions: ShareMap, amount: Money) -> ValidationResult<ShareMap> {
    let mut paid_by = ShareMap::with_capacity(contributions.len());

    for (payer, contribution) in contributions {
        validate_participant_id(&payer)?;
        if contribution.is_negative() {
            return Err(ValidationError::MustBePositive {
                field: format!("contribution of {payer}"),
            });
        }
        if !contribution.is_within_limit() {
            return Err(ValidationError::TooLarge {
                field: format!("contribution of {payer}"),
                max: Money::MAX_AMOUNT,
            });
        }
        if contribution.is_positive() {
            paid_by.insert(payer, contribution);
        }
    }

    if paid_by.is_empty() {
        return Err(ValidationError::NoPayers);
    }

    let paid = paid_by
        .values()
        .try_fold(Money::zero(), |acc, contribution| acc.checked_add(*contribution))
        .ok_or_else(|| ValidationError::TooLarge {
            field: "total paid".to_string(),
            max: Money::MAX_AMOUNT,
        })?;
    if paid != amount {
        return Err(ValidationError::PayerTotalMismatch { paid, amount });
    }

    Ok(paid_by)
}

// =============================================================================
// Roster Validators
// =============================================================================

/// Validates a participant roster: ids must be non-blank and unique.
pub fn validate_roster(participants: &[Participant]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(participants.len());

    for participant in participants {
        validate_participant_id(&participant.id)?;
        if !seen.insert(participant.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "participant".to_string(),
                value: participant.id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn ids(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| ParticipantId::from(*n)).collect()
    }

    fn contributions(entries: &[(&str, i64)]) -> ShareMap {
        entries
            .iter()
            .map(|(id, cents)| (ParticipantId::from(*id), Money::from_cents(*cents)))
            .collect()
    }

    #[fixture]
    fn dinner() -> ExpenseDraft {
        ExpenseDraft {
            description: "Dinner".to_string(),
            amount: Money::from_cents(10000),
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
            payer: PayerInput::Single("a".into()),
            consumers: ids(&["a", "b", "c"]),
        }
    }

    #[rstest]
    fn test_single_payer(dinner: ExpenseDraft) {
        let expense = build_expense(dinner).unwrap();
        assert_eq!(expense.description(), "Dinner");
        assert_eq!(expense.amount().cents(), 10000);
        assert_eq!(expense.paid_by(), &contributions(&[("a", 10000)]));
        assert_eq!(
            expense.split_between(),
            &contributions(&[("a", 3334), ("b", 3333), ("c", 3333)])
        );
        assert_eq!(expense.date(), NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[rstest]
    fn test_multiple_payers_drop_zero_entries(mut dinner: ExpenseDraft) {
        dinner.payer = PayerInput::Multiple(contributions(&[("a", 6000), ("b", 0), ("c", 4000)]));
        let expense = build_expense(dinner).unwrap();
        assert_eq!(expense.paid_by(), &contributions(&[("a", 6000), ("c", 4000)]));
    }

    #[rstest]
    fn test_multiple_payers_must_match_amount(mut dinner: ExpenseDraft) {
        dinner.payer = PayerInput::Multiple(contributions(&[("a", 6000), ("b", 3000)]));
        assert_eq!(
            build_expense(dinner).unwrap_err(),
            ValidationError::PayerTotalMismatch {
                paid: Money::from_cents(9000),
                amount: Money::from_cents(10000),
            }
        );
    }

    #[rstest]
    fn test_multiple_payers_all_zero(mut dinner: ExpenseDraft) {
        dinner.payer = PayerInput::Multiple(contributions(&[("a", 0), ("b", 0)]));
        assert_eq!(build_expense(dinner).unwrap_err(), ValidationError::NoPayers);
    }

    #[rstest]
    fn test_negative_contribution(mut dinner: ExpenseDraft) {
        dinner.payer = PayerInput::Multiple(contributions(&[("a", 11000), ("b", -1000)]));
        assert!(matches!(
            build_expense(dinner).unwrap_err(),
            ValidationError::MustBePositive { .. }
        ));
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-100)]
    fn test_amount_must_be_positive(mut dinner: ExpenseDraft, #[case] cents: i64) {
        dinner.amount = Money::from_cents(cents);
        assert!(matches!(
            build_expense(dinner).unwrap_err(),
            ValidationError::MustBePositive { .. }
        ));
    }

    #[rstest]
    fn test_amount_above_limit(mut dinner: ExpenseDraft) {
        dinner.amount = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        assert!(matches!(
            build_expense(dinner).unwrap_err(),
            ValidationError::TooLarge { ref field, .. } if field == "amount"
        ));
    }

    #[rstest]
    fn test_amount_at_limit(mut dinner: ExpenseDraft) {
        dinner.amount = Money::MAX_AMOUNT;
        let expense = build_expense(dinner).unwrap();
        assert_eq!(expense.split_between().values().sum::<Money>(), Money::MAX_AMOUNT);
    }

    #[rstest]
    fn test_huge_contributions_are_rejected_not_summed(mut dinner: ExpenseDraft) {
        let huge = 9_000_000_000_000_000_000;
        dinner.payer = PayerInput::Multiple(contributions(&[("a", huge), ("b", huge)]));
        assert!(matches!(
            build_expense(dinner).unwrap_err(),
            ValidationError::TooLarge { .. }
        ));
    }

    #[rstest]
    fn test_consumers_required(mut dinner: ExpenseDraft) {
        dinner.consumers.clear();
        assert_eq!(build_expense(dinner).unwrap_err(), ValidationError::NoConsumers);
    }

    #[rstest]
    fn test_duplicate_consumer(mut dinner: ExpenseDraft) {
        dinner.consumers = ids(&["a", "b", "a"]);
        assert!(matches!(
            build_expense(dinner).unwrap_err(),
            ValidationError::Duplicate { .. }
        ));
    }

    #[rstest]
    fn test_blank_payer(mut dinner: ExpenseDraft) {
        dinner.payer = PayerInput::Single(" ".into());
        assert!(matches!(
            build_expense(dinner).unwrap_err(),
            ValidationError::Required { .. }
        ));
    }

    #[rstest]
    fn test_description_is_trimmed(mut dinner: ExpenseDraft) {
        dinner.description = "  Dinner  ".to_string();
        assert_eq!(build_expense(dinner).unwrap().description(), "Dinner");
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Groceries").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LEN)).is_ok());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_roster() {
        let roster = vec![Participant::new("a", "Asha"), Participant::new("b", "Bala")];
        assert!(validate_roster(&roster).is_ok());
        assert!(validate_roster(&[]).is_ok());

        let duplicated = vec![Participant::new("a", "Asha"), Participant::new("a", "Again")];
        assert!(matches!(
            validate_roster(&duplicated).unwrap_err(),
            ValidationError::Duplicate { .. }
        ));

        let blank = vec![Participant::new("", "Nobody")];
        assert!(validate_roster(&blank).is_err());
    }

    #[test]
    fn test_draft_deserializes_from_json() {
        let json = r#"{
            "description": "Cab",
            "amount": 6000,
            "payer": {"multiple": {"a": 2000, "b": 4000}},
            "consumers": ["a", "b", "c"]
        }"#;
        let draft: ExpenseDraft = serde_json::from_str(json).unwrap();
        let expense = build_expense(draft).unwrap();
        assert_eq!(expense.paid_by().len(), 2);
        assert_eq!(expense.split_between()["c"].cents(), 2000);
    }
}
