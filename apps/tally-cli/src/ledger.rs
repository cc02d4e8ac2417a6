//! # Ledger Files
//!
//! JSON ledger format read by the CLI. Amounts are decimal strings so that
//! files never carry binary floating point:
//!
//! ```json
//! {
//!   "participants": [{"id": "a", "name": "Asha"}, {"id": "b", "name": "Bala"}],
//!   "expenses": [
//!     {"description": "Cab", "amount": "60", "date": "2024-05-01",
//!      "payer": {"multiple": {"a": "20", "b": "40"}},
//!      "consumers": ["a", "b"]}
//!   ]
//! }
//! ```
//!
//! Every expense goes through [`tally_core::build_expense`]; the first one
//! that fails aborts loading with its index.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

use tally_core::validation::validate_roster;
use tally_core::{
    build_expense, ExpenseDraft, ExpenseRecord, Money, Participant, ParticipantId, PayerInput,
    ShareMap, ValidationResult,
};

use crate::error::{CliError, CliResult};

// =============================================================================
// File Shape
// =============================================================================

/// Top-level document as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerFile {
    #[serde(default)]
    pub participants: Vec<Participant>,

    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
}

/// One expense as written in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseEntry {
    pub description: String,
    pub amount: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub payer: PayerEntry,
    pub consumers: Vec<ParticipantId>,
}

/// Payer as written in the file, with string amounts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayerEntry {
    Single(ParticipantId),
    Multiple(IndexMap<ParticipantId, String>),
}

impl ExpenseEntry {
    /// Parses the string amounts into an [`ExpenseDraft`].
    pub fn into_draft(self) -> ValidationResult<ExpenseDraft> {
        let amount: Money = self.amount.parse()?;

        let payer = match self.payer {
            PayerEntry::Single(id) => PayerInput::Single(id),
            PayerEntry::Multiple(contributions) => {
                let mut parsed = ShareMap::with_capacity(contributions.len());
                for (id, value) in contributions {
                    parsed.insert(id, value.parse()?);
                }
                PayerInput::Multiple(parsed)
            }
        };

        Ok(ExpenseDraft {
            description: self.description,
            amount,
            date: self.date,
            payer,
            consumers: self.consumers,
        })
    }
}

// =============================================================================
// Validated Ledger
// =============================================================================

/// A roster plus validated expense records, ready to reconcile.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub participants: Vec<Participant>,
    pub expenses: Vec<ExpenseRecord>,
}

impl Ledger {
    /// Reads and validates a ledger file.
    pub fn load(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading ledger");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses and validates a ledger document.
    pub fn from_json(contents: &str) -> CliResult<Self> {
        let file: LedgerFile = serde_json::from_str(contents)?;
        Self::from_file(file)
    }

    /// Validates the roster, then builds every expense in file order.
    pub fn from_file(file: LedgerFile) -> CliResult<Self> {
        validate_roster(&file.participants)?;

        let roster: HashSet<&str> = file.participants.iter().map(|p| p.id.as_str()).collect();

        let mut expenses = Vec::with_capacity(file.expenses.len());
        for (index, entry) in file.expenses.into_iter().enumerate() {
            let expense = entry
                .into_draft()
                .and_then(build_expense)
                .map_err(|source| CliError::InvalidExpense { index, source })?;

            let outsiders = expense
                .paid_by()
                .keys()
                .chain(expense.split_between().keys())
                .filter(|id| !roster.contains(id.as_str()));
            for id in outsiders {
                warn!(index, participant = %id, "Expense references a participant outside the roster");
            }

            expenses.push(expense);
        }

        debug!(
            participants = file.participants.len(),
            expenses = expenses.len(),
            "Ledger validated"
        );

        Ok(Ledger {
            participants: file.participants,
            expenses,
        })
    }
}
