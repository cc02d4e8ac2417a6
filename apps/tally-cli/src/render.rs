//! Output rendering for reconciliation results.

use std::fmt::{self, Write};

use tally_core::{display_name, total_spent, BalanceStatus, Participant, Reconciliation};

use crate::config::OutputFormat;
use crate::error::CliResult;
use crate::ledger::Ledger;

/// Renders `result` for `ledger` in the requested format.
pub fn render(
    result: &Reconciliation,
    ledger: &Ledger,
    format: OutputFormat,
    currency_symbol: &str,
) -> CliResult<String> {
    match format {
        OutputFormat::Text => render_text(result, ledger, currency_symbol),
        OutputFormat::Json => render_json(result),
    }
}

/// Total spent, balance lines, then the settlement plan.
///
/// ```text
/// Total Spent ₹100.00
///
/// Balances
///   Asha gets back ₹66.66
///   Bala owes ₹33.33
///
/// Settlement Plan
///   Bala pays Asha ₹33.33
/// ```
///
/// A ledger without expenses renders as `No balances yet.`
pub fn render_text(
    result: &Reconciliation,
    ledger: &Ledger,
    currency_symbol: &str,
) -> CliResult<String> {
    let mut out = String::new();
    write_report(&mut out, result, ledger, currency_symbol)?;
    Ok(out)
}

fn write_report<W: Write>(
    out: &mut W,
    result: &Reconciliation,
    ledger: &Ledger,
    currency_symbol: &str,
) -> fmt::Result {
    if ledger.expenses.is_empty() {
        return writeln!(out, "No balances yet.");
    }

    writeln!(
        out,
        "Total Spent {}{}",
        currency_symbol,
        total_spent(&ledger.expenses)
    )?;
    writeln!(out)?;

    writeln!(out, "Balances")?;
    if result.is_settled_up() {
        writeln!(out, "  Everyone is settled up!")?;
    } else {
        write_balances(out, result, &ledger.participants, currency_symbol)?;
    }

    if !result.settlements.is_empty() {
        writeln!(out)?;
        writeln!(out, "Settlement Plan")?;
        for s in &result.settlements {
            writeln!(
                out,
                "  {} pays {} {}{}",
                display_name(&ledger.participants, &s.from),
                display_name(&ledger.participants, &s.to),
                currency_symbol,
                s.amount
            )?;
        }
    }

    Ok(())
}

fn write_balances<W: Write>(
    out: &mut W,
    result: &Reconciliation,
    participants: &[Participant],
    currency_symbol: &str,
) -> fmt::Result {
    for line in result.outstanding(participants) {
        let verb = match line.status {
            BalanceStatus::Owed => "gets back",
            BalanceStatus::Owes => "owes",
            BalanceStatus::Settled => continue,
        };
        writeln!(
            out,
            "  {} {} {}{}",
            line.name,
            verb,
            currency_symbol,
            line.amount.abs()
        )?;
    }
    Ok(())
}

/// Pretty-printed JSON with amounts in cents.
pub fn render_json(result: &Reconciliation) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
