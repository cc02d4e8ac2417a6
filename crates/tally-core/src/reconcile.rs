//! # Reconciliation
//!
//! Runs the aggregator and planner together and shapes the result for a
//! balance screen: who is owed, who owes, and how to settle.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::balance::aggregate;
use crate::money::Money;
use crate::settlement::plan;
use crate::types::{
    BalanceStatus, Balances, ExpenseRecord, Participant, ParticipantId, SettlementPlan,
};

/// Shown for ids that have balances but are no longer on the roster.
pub const UNKNOWN_PARTICIPANT_NAME: &str = "Unknown";

/// Balances and the plan that settles them, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reconciliation {
    pub balances: Balances,
    pub settlements: SettlementPlan,
}

/// One outstanding balance, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BalanceLine {
    pub id: ParticipantId,
    pub name: String,
    pub amount: Money,
    pub status: BalanceStatus,
}

/// Aggregates `expenses` over `participants` and plans the settlement.
pub fn reconcile(expenses: &[ExpenseRecord], participants: &[Participant]) -> Reconciliation {
    let balances = aggregate(expenses, participants.iter().map(|p| &p.id));
    let settlements = plan(&balances);
    Reconciliation {
        balances,
        settlements,
    }
}

/// Sum of every expense amount: what the group has spent in total.
pub fn total_spent(expenses: &[ExpenseRecord]) -> Money {
    expenses.iter().map(ExpenseRecord::amount).sum()
}

/// Resolves a display name, falling back to [`UNKNOWN_PARTICIPANT_NAME`].
pub fn display_name<'a>(participants: &'a [Participant], id: &ParticipantId) -> &'a str {
    participants
        .iter()
        .find(|p| &p.id == id)
        .map(|p| p.name.as_str())
        .unwrap_or(UNKNOWN_PARTICIPANT_NAME)
}

impl Reconciliation {
    /// True when nobody owes anything.
    pub fn is_settled_up(&self) -> bool {
        self.balances.values().all(Money::is_zero)
    }

    /// Non-zero balances with names attached, in balance-map order.
    ///
    /// Because the aggregator puts roster participants first, roster order
    /// is preserved and former members trail at the end.
    pub fn outstanding(&self, participants: &[Participant]) -> Vec<BalanceLine> {
        self.balances
            .iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(id, amount)| BalanceLine {
                id: id.clone(),
                name: display_name(participants, id).to_string(),
                amount: *amount,
                status: BalanceStatus::of(*amount),
            })
            .collect()
    }

    /// Total amount changing hands under the plan.
    pub fn total_transferred(&self) -> Money {
        self.settlements.iter().map(|s| s.amount).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShareMap;

    fn shares(entries: &[(&str, i64)]) -> ShareMap {
        entries
            .iter()
            .map(|(id, cents)| (ParticipantId::from(*id), Money::from_cents(*cents)))
            .collect()
    }

    fn group() -> Vec<Participant> {
        vec![
            Participant::new("a", "Asha"),
            Participant::new("b", "Bala"),
            Participant::new("c", "Chen"),
        ]
    }

    #[test]
    fn test_reconcile_two_expenses() {
        let expenses = [
            ExpenseRecord::new(
                Money::from_cents(10000),
                shares(&[("a", 10000)]),
                shares(&[("a", 3334), ("b", 3333), ("c", 3333)]),
            ),
            ExpenseRecord::new(
                Money::from_cents(6000),
                shares(&[("b", 6000)]),
                shares(&[("a", 2000), ("b", 2000), ("c", 2000)]),
            ),
        ];
        let result = reconcile(&expenses, &group());

        assert!(!result.is_settled_up());
        assert_eq!(result.total_transferred().cents(), 5333);
        assert!(result.settlements.iter().all(|s| s.from.as_str() == "c"));

        let lines = result.outstanding(&group());
        let summary: Vec<(&str, i64, BalanceStatus)> = lines
            .iter()
            .map(|l| (l.name.as_str(), l.amount.cents(), l.status))
            .collect();
        assert_eq!(
            summary,
            [
                ("Asha", 4666, BalanceStatus::Owed),
                ("Bala", 667, BalanceStatus::Owed),
                ("Chen", -5333, BalanceStatus::Owes),
            ]
        );
    }

    #[test]
    fn test_single_participant_no_expenses() {
        let roster = vec![Participant::new("a", "Asha")];
        let result = reconcile(&[], &roster);

        assert_eq!(result.balances.len(), 1);
        assert!(result.settlements.is_empty());
        assert!(result.is_settled_up());
        assert!(result.outstanding(&roster).is_empty());
    }

    #[test]
    fn test_former_member_shows_as_unknown() {
        let expenses = [ExpenseRecord::new(
            Money::from_cents(1000),
            shares(&[("a", 1000)]),
            shares(&[("z", 1000)]),
        )];
        let roster = vec![Participant::new("a", "Asha")];
        let result = reconcile(&expenses, &roster);

        let lines = result.outstanding(&roster);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].name, UNKNOWN_PARTICIPANT_NAME);
        assert_eq!(lines[1].status, BalanceStatus::Owes);
        assert_eq!(result.settlements.len(), 1);
    }

    #[test]
    fn test_total_spent() {
        let expenses = [
            ExpenseRecord::new(
                Money::from_cents(10000),
                shares(&[("a", 10000)]),
                shares(&[("a", 5000), ("b", 5000)]),
            ),
            ExpenseRecord::new(
                Money::from_cents(6000),
                shares(&[("b", 6000)]),
                shares(&[("a", 3000), ("b", 3000)]),
            ),
        ];
        assert_eq!(total_spent(&expenses).cents(), 16000);
        assert_eq!(total_spent(&[]), Money::zero());
    }

    #[test]
    fn test_display_name() {
        let roster = group();
        assert_eq!(display_name(&roster, &"b".into()), "Bala");
        assert_eq!(display_name(&roster, &"x".into()), UNKNOWN_PARTICIPANT_NAME);
    }

    #[test]
    fn test_reconciliation_serializes_balances_in_order() {
        let roster = vec![Participant::new("b", "Bala"), Participant::new("a", "Asha")];
        let result = reconcile(&[], &roster);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"balances":{"b":0,"a":0},"settlements":[]}"#);
    }
}
