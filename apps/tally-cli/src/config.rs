//! # CLI Configuration
//!
//! Display and logging settings for the `tally` command.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by main)             │
//! │     --format json                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TALLY_CURRENCY_SYMBOL=$                                            │
//! │     TALLY_FORMAT=json                                                  │
//! │     TALLY_LOG_LEVEL=debug                                              │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/tally/tally.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.tally.tally/tally.toml (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     ₹, text output, warn level                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tally.toml
//! [display]
//! currency_symbol = "₹"
//! format = "text"  # text | json
//!
//! [logging]
//! level = "warn"   # error | warn | info | debug | trace
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Accepted values for `[logging] level`.
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Output Format
// =============================================================================

/// How reconciliation results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable balances and plan (default).
    #[default]
    Text,

    /// `{"balances": ..., "settlements": ...}` with amounts in cents.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::Config(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Settings Sections
// =============================================================================

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for every printed amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            format: OutputFormat::default(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter used when `TALLY_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// =============================================================================
// CLI Configuration
// =============================================================================

/// Complete configuration for one `tally` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`path`, else the platform config dir's `tally.toml`)
    /// 3. Environment variables
    ///
    /// A missing file is not an error. Runs before the subscriber is
    /// installed, so its own log events are only seen in tests.
    pub fn load(path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        if let Some(path) = path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `TALLY_*` overrides, reading variables through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.display.currency_symbol = symbol;
        }

        if let Some(format) = lookup("TALLY_FORMAT") {
            debug!(format = %format, "Overriding output format from environment");
            self.display.format = format.parse()?;
        }

        if let Some(level) = lookup("TALLY_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.display.currency_symbol.chars().count() > 8 {
            return Err(CliError::Config(format!(
                "currency_symbol must be at most 8 characters, got: '{}'",
                self.display.currency_symbol
            )));
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(CliError::Config(format!(
                "Unknown log level: '{}'. Valid options: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join("tally.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.display.currency_symbol, "₹");
        assert_eq!(config.display.format, OutputFormat::Text);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml(
            r#"
            [display]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.display.format, OutputFormat::Json);
        assert_eq!(config.display.currency_symbol, "₹");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            CliConfig::from_toml("[display]\nformat = \"xml\""),
            Err(CliError::Toml(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_overrides(env(&[
                ("TALLY_CURRENCY_SYMBOL", "$"),
                ("TALLY_FORMAT", "json"),
                ("TALLY_LOG_LEVEL", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.display.format, OutputFormat::Json);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_bad_env_format_is_config_error() {
        let mut config = CliConfig::default();
        let result = config.apply_overrides(env(&[("TALLY_FORMAT", "csv")]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_config_validation() {
        let mut config = CliConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "INFO".to_string();
        assert!(config.validate().is_ok());

        config.display.currency_symbol = "dollars and cents".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("tally-config-that-does-not-exist.toml");
        let config = CliConfig::load(Some(path));
        // Environment may carry TALLY_* overrides; only the file is under test.
        assert!(config.is_ok() || matches!(config, Err(CliError::Config(_))));
    }

    #[test]
    fn test_toml_serialization() {
        let config = CliConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[display]"));
        assert!(toml_str.contains("format = \"text\""));
        assert_eq!(CliConfig::from_toml(&toml_str).unwrap(), config);
    }
}
