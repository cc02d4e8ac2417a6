//! # tally
//!
//! Prints who owes whom for a shared-expense ledger file.
//!
//! ## Usage
//! ```bash
//! tally ledger.json
//! tally --format json ledger.json
//! tally --config ./tally.toml ledger.json
//!
//! # Verbose logging to stderr
//! TALLY_LOG=debug tally ledger.json
//! ```

use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tally_cli::{parse_args, run, CliConfig, CliResult, Invocation, USAGE};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn try_main() -> CliResult<()> {
    let args = match parse_args(std::env::args().skip(1))? {
        Invocation::Help => {
            println!("{USAGE}");
            println!();
            println!("Options:");
            println!("  -c, --config <PATH>   Config file (default: platform config dir tally.toml)");
            println!("  -f, --format <FMT>    Output format: text | json");
            println!("  -h, --help            Show this help message");
            return Ok(());
        }
        Invocation::Run(args) => args,
    };

    let config = CliConfig::load(args.config_path.clone())?;
    init_tracing(&config.logging.level);
    info!(
        ledger = ?args.ledger_path,
        format = %args.format.unwrap_or(config.display.format),
        "Configuration loaded"
    );

    let output = run(&args, &config)?;
    print!("{output}");
    Ok(())
}

/// Installs the stderr subscriber.
///
/// ## Log Levels
/// - `TALLY_LOG=debug` - Show computation summaries
/// - `TALLY_LOG=tally_core=trace` - Per-crate filters work too
/// - Default: the configured `[logging] level`
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("TALLY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
