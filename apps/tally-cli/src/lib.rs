//! # tally-cli: Ledger File Front End
//!
//! Loads a JSON ledger, reconciles it with `tally-core` and renders the
//! balances plus settlement plan as text or JSON.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ──► Invocation                                                   │
//! │  tally.toml + TALLY_* ──► CliConfig                                    │
//! │                                                                         │
//! │  ledger.json ──► Ledger::load ──► reconcile ──► render ──► stdout      │
//! │                  (validation)     (core)        (text | json)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod ledger;
pub mod render;

use std::path::PathBuf;

use tracing::debug;

use tally_core::reconcile;

pub use config::{CliConfig, OutputFormat};
pub use error::{CliError, CliResult};
pub use ledger::Ledger;

pub const USAGE: &str = "Usage: tally [--config PATH] [--format text|json] LEDGER.json";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(RunArgs),
}

/// Arguments for a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub config_path: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub ledger_path: PathBuf,
}

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> CliResult<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path = None;
    let mut format = None;
    let mut ledger_path = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("--config needs a path\n{USAGE}")))?;
                config_path = Some(PathBuf::from(value));
            }
            "--format" | "-f" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("--format needs a value\n{USAGE}")))?;
                let parsed = value
                    .parse::<OutputFormat>()
                    .map_err(|e| CliError::Usage(e.to_string()))?;
                format = Some(parsed);
            }
            "--help" | "-h" => return Ok(Invocation::Help),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(CliError::Usage(format!("Unknown option: {flag}\n{USAGE}")));
            }
            path => {
                if ledger_path.is_some() {
                    return Err(CliError::Usage(format!(
                        "Only one ledger file may be given\n{USAGE}"
                    )));
                }
                ledger_path = Some(PathBuf::from(path));
            }
        }
    }

    let ledger_path =
        ledger_path.ok_or_else(|| CliError::Usage(format!("Missing ledger file\n{USAGE}")))?;

    Ok(Invocation::Run(RunArgs {
        config_path,
        format,
        ledger_path,
    }))
}

/// Loads the ledger, reconciles it and returns the rendered output.
///
/// A `--format` flag wins over the configured format.
pub fn run(args: &RunArgs, config: &CliConfig) -> CliResult<String> {
    let ledger = Ledger::load(&args.ledger_path)?;
    let result = reconcile(&ledger.expenses, &ledger.participants);

    debug!(
        settled = result.is_settled_up(),
        settlements = result.settlements.len(),
        "Ledger reconciled"
    );

    let format = args.format.unwrap_or(config.display.format);
    render::render(&result, &ledger, format, &config.display.currency_symbol)
}
