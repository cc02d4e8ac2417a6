//! # Domain Types
//!
//! Core domain types shared by the allocator, aggregator and planner.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Participant    │   │ ExpenseRecord   │   │   Settlement    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  amount         │   │  from (debtor)  │       │
//! │  │  name           │   │  paid_by        │   │  to (creditor)  │       │
//! │  └─────────────────┘   │  split_between  │   │  amount > 0     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Balances = IndexMap<ParticipantId, Money>                             │
//! │    positive: is owed money    negative: owes money                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Every map in this module is insertion-ordered. The settlement planner
//! breaks ties between equal balances by map order, so an ordered map is
//! what makes two runs over the same ledger produce the same plan.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Participant
// =============================================================================

/// Opaque participant identifier, unique within a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        ParticipantId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        ParticipantId(id.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        ParticipantId(id)
    }
}

impl Borrow<str> for ParticipantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A person or guest tracked within a group.
///
/// Only `id` takes part in any computation; `name` is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Expense Record
// =============================================================================

/// Who contributed or consumed how much of one expense.
pub type ShareMap = IndexMap<ParticipantId, Money>;

/// One recorded expense: a total, who paid it and who consumes it.
///
/// Immutable once constructed. [`ExpenseRecord::new`] trusts that both
/// `paid_by` and `split_between` add up to `amount`; use
/// [`crate::validation::build_expense`] when that still has to be checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseRecord {
    #[serde(default = "Uuid::new_v4")]
    #[ts(as = "String")]
    id: Uuid,

    #[serde(default)]
    description: String,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    date: Option<NaiveDate>,

    amount: Money,

    paid_by: ShareMap,

    split_between: ShareMap,
}

impl ExpenseRecord {
    /// Creates a record without checking any cross-field sums.
    pub fn new(amount: Money, paid_by: ShareMap, split_between: ShareMap) -> Self {
        ExpenseRecord {
            id: Uuid::new_v4(),
            description: String::new(),
            date: None,
            amount,
            paid_by,
            split_between,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Contributions by payer.
    pub fn paid_by(&self) -> &ShareMap {
        &self.paid_by
    }

    /// Consumed shares by consumer.
    pub fn split_between(&self) -> &ShareMap {
        &self.split_between
    }
}

// =============================================================================
// Balances & Settlements
// =============================================================================

/// Net position per participant. Positive is owed, negative owes.
pub type Balances = IndexMap<ParticipantId, Money>;

/// A single recommended payment: `from` pays `to` the given amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

/// Ordered list of settlements that together zero every balance.
pub type SettlementPlan = Vec<Settlement>;

/// Which side of the ledger a participant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    /// Net creditor: gets money back.
    Owed,
    /// Net debtor: has to pay.
    Owes,
    /// Nothing outstanding.
    Settled,
}

impl BalanceStatus {
    pub fn of(balance: Money) -> Self {
        if balance.is_positive() {
            BalanceStatus::Owed
        } else if balance.is_negative() {
            BalanceStatus::Owes
        } else {
            BalanceStatus::Settled
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
