//! # Settlement Planner
//!
//! Turns a balance map into a short list of point-to-point payments.
//!
//! ## Greedy Two-Cursor Matching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  balances: A +46.66   B +6.67   C -53.33                                │
//! │                                                                         │
//! │  debtors   (ascending):   [C -53.33]                                    │
//! │  creditors (descending):  [A +46.66, B +6.67]                           │
//! │                                                                         │
//! │  step 1: C ─► A  min(53.33, 46.66) = 46.66    A done → next creditor   │
//! │  step 2: C ─► B  min( 6.67,  6.67) =  6.67    C done, B done            │
//! │                                                                         │
//! │  plan: [C→A 46.66, C→B 6.67]                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Largest debt meets largest credit first. This usually keeps the plan
//! short but is not an exact minimum-transaction solver, and it must not be
//! replaced by one: consumers of the plan rely on exactly this output.
//!
//! Ties between equal balances keep balance-map order (stable sort).
//!
//! Balances within [`SETTLED_TOLERANCE`] of zero are treated as settled and
//! never enter the matching.

use tracing::{debug, warn};

use crate::money::Money;
use crate::types::{Balances, ParticipantId, Settlement, SettlementPlan};

/// Largest magnitude still considered settled: one cent.
pub const SETTLED_TOLERANCE: Money = Money::from_cents(1);

/// True when `balance` is close enough to zero to need no payment.
pub fn is_settled(balance: Money) -> bool {
    balance.abs() <= SETTLED_TOLERANCE
}

/// One side of the matching with its still-unsettled amount.
///
/// `remaining` is always kept positive: a debtor's debt magnitude or a
/// creditor's credit.
#[derive(Debug)]
struct OpenPosition<'a> {
    id: &'a ParticipantId,
    remaining: Money,
}

/// Computes the settlement plan for `balances`.
///
/// ## Guarantees
/// - Every emitted amount is positive
/// - At most `debtors + creditors - 1` settlements
/// - Balances within one cent of zero are skipped, so a map where every
///   entry is within one cent yields an empty plan
/// - Same input, same output (order and amounts)
///
/// Skipped one-cent balances, and balances that do not sum to zero, leave
/// part of the other side unmatched. That residue stays unsettled. It is
/// logged at `debug` level while it is no larger than the skipped cents,
/// and at `warn` level beyond that.
///
/// ## Example
/// ```rust
/// use tally_core::settlement::plan;
/// use tally_core::{Balances, Money, ParticipantId};
///
/// let balances: Balances = [("a", 6666), ("b", -3333), ("c", -3333)]
///     .into_iter()
///     .map(|(id, cents)| (ParticipantId::from(id), Money::from_cents(cents)))
///     .collect();
///
/// let settlements = plan(&balances);
/// assert_eq!(settlements.len(), 2);
/// assert_eq!(settlements[0].from.as_str(), "b");
/// assert_eq!(settlements[0].to.as_str(), "a");
/// assert_eq!(settlements[0].amount.cents(), 3333);
/// ```
pub fn plan(balances: &Balances) -> SettlementPlan {
    let mut debtors: Vec<OpenPosition<'_>> = Vec::new();
    let mut creditors: Vec<OpenPosition<'_>> = Vec::new();

    let mut skipped = Money::zero();
    for (id, balance) in balances {
        if is_settled(*balance) {
            skipped += balance.abs();
        } else if balance.is_negative() {
            debtors.push(OpenPosition {
                id,
                remaining: balance.abs(),
            });
        } else {
            creditors.push(OpenPosition {
                id,
                remaining: *balance,
            });
        }
    }

    // Largest debt first, largest credit first. Both sorts are stable.
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let debtor_count = debtors.len();
    let creditor_count = creditors.len();
    let mut settlements = SettlementPlan::with_capacity(
        (debtor_count + creditor_count).saturating_sub(1),
    );

    let mut i = 0;
    let mut j = 0;
    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];

        let amount = debtor.remaining.min(creditor.remaining);
        if amount.is_positive() {
            settlements.push(Settlement {
                from: debtor.id.clone(),
                to: creditor.id.clone(),
                amount,
            });
        }

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if debtor.remaining.is_zero() {
            i += 1;
        }
        if creditor.remaining.is_zero() {
            j += 1;
        }
    }

    let unsettled_debt: Money = debtors[i..].iter().map(|d| d.remaining).sum();
    let unsettled_credit: Money = creditors[j..].iter().map(|c| c.remaining).sum();
    let unsettled = unsettled_debt + unsettled_credit;
    if unsettled > skipped {
        warn!(
            %unsettled_debt,
            %unsettled_credit,
            "Balances do not sum to zero; leaving residue unsettled"
        );
    } else if !unsettled.is_zero() {
        debug!(%unsettled, %skipped, "Residue from one-cent balances left unsettled");
    }

    debug!(
        debtors = debtor_count,
        creditors = creditor_count,
        settlements = settlements.len(),
        "Settlement plan computed"
    );

    settlements
}

/// Applies `settlements` to `balances` and returns the result.
///
/// The payer's balance moves up by the amount and the payee's moves down.
/// Applying a plan to the conserved balances it was computed from leaves
/// every entry at zero, unless one-cent balances were skipped. Ids not
/// already present are appended.
pub fn apply(balances: &Balances, settlements: &[Settlement]) -> Balances {
    let mut after = balances.clone();
    for settlement in settlements {
        *after.entry(settlement.from.clone()).or_default() += settlement.amount;
        *after.entry(settlement.to.clone()).or_default() -= settlement.amount;
    }
    after
}

// =============================================================================
// Unit Tests
// =============================================================================
