//! # CLI Error Types
//!
//! Everything that can stop a `tally` run, from unreadable files to an
//! expense that fails validation.

use thiserror::Error;

use tally_core::{CoreError, ValidationError};

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the ledger or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The ledger file is not valid JSON or has the wrong shape.
    #[error("Invalid ledger file: {0}")]
    Json(#[from] serde_json::Error),

    /// The config file is not valid TOML.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A config value (file or environment) is out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Writing the text report failed.
    #[error("Failed to format output: {0}")]
    Format(#[from] std::fmt::Error),

    /// Bad command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// One expense in the ledger was rejected. `index` is zero-based.
    #[error("Expense at index {index} is invalid: {source}")]
    InvalidExpense {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Roster or other core failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(CoreError::Validation(err))
    }
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Usage mistakes exit with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
