//! # Balance Aggregation
//!
//! Folds a set of expense records into one signed balance per participant.
//!
//! ```text
//! for each expense:
//!     paid_by[p]       → balance[p] += contribution   (credit)
//!     split_between[c] → balance[c] -= share          (debit)
//! ```
//!
//! Ids that appear in an expense but not in the roster are still
//! accumulated, so a participant who left the group keeps their history.

use tracing::{debug, warn};

use crate::money::Money;
use crate::types::{Balances, ExpenseRecord, ParticipantId};

/// Computes each participant's net balance over `expenses`.
///
/// Every roster participant appears in the result, in roster order, even
/// with no expenses. Ids seen only in expenses follow in order of first
/// appearance.
///
/// Payer and consumer sums are not checked against `amount`. If they
/// disagree the balances will not sum to zero; that is reported with a
/// `warn` event and otherwise passed through.
///
/// ## Example
/// ```rust
/// use tally_core::balance::aggregate;
/// use tally_core::{ExpenseRecord, Money, ParticipantId};
///
/// let roster: Vec<ParticipantId> = ["a", "b"].into_iter().map(Into::into).collect();
/// let dinner = ExpenseRecord::new(
///     Money::from_cents(1000),
///     [("a".into(), Money::from_cents(1000))].into_iter().collect(),
///     [("a".into(), Money::from_cents(500)), ("b".into(), Money::from_cents(500))]
///         .into_iter()
///         .collect(),
/// );
///
/// let balances = aggregate(&[dinner], &roster);
/// assert_eq!(balances["a"].cents(), 500);
/// assert_eq!(balances["b"].cents(), -500);
/// ```
pub fn aggregate<'a, I>(expenses: &[ExpenseRecord], participants: I) -> Balances
where
    I: IntoIterator<Item = &'a ParticipantId>,
{
    let mut balances: Balances = participants
        .into_iter()
        .map(|id| (id.clone(), Money::zero()))
        .collect();

    for expense in expenses {
        for (payer, contribution) in expense.paid_by() {
            *balances.entry(payer.clone()).or_default() += *contribution;
        }
        for (consumer, share) in expense.split_between() {
            *balances.entry(consumer.clone()).or_default() -= *share;
        }
    }

    let total: Money = balances.values().sum();
    debug!(
        expenses = expenses.len(),
        participants = balances.len(),
        "Aggregated balances"
    );
    if !total.is_zero() {
        warn!(%total, "Balances do not sum to zero; expense totals are inconsistent");
    }

    balances
}

// =============================================================================
// Unit Tests
// =============================================================================
