//! Session configuration.
//!
//! Every field has a default matching a freshly opened demo account, so an
//! empty JSON object is a complete configuration.
//!
//! ```rust
//! use atm_session::SessionConfig;
//!
//! let config = SessionConfig::from_json_str(r#"{ "opening_balance": 100, "pin": "4321" }"#)?;
//! assert_eq!(config.pin, "4321");
//! assert_eq!(config.statement_length, 5);
//! # Ok::<(), atm_session::ConfigError>(())
//! ```

use crate::account::is_pin_shaped;
use crate::effects::is_valid_format;
use crate::error::ConfigError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Balance the account opens with
    pub opening_balance: Decimal,

    /// PIN the account opens with
    pub pin: String,

    /// Log a deposit of the opening balance when the session starts.
    /// The balance itself is not changed.
    pub seed_opening_deposit: bool,

    /// Number of transactions shown on the statement screen
    pub statement_length: usize,

    /// Delay before returning to the dashboard after a successful operation
    pub success_delay_ms: u64,

    /// Delay before the exit screen logs out
    pub exit_delay_ms: u64,

    /// Interval between clock display refreshes
    pub clock_refresh_secs: u64,

    /// chrono format for transaction dates
    pub date_format: String,

    /// chrono format for the clock display
    pub time_format: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opening_balance: Decimal::new(500_000, 2),
            pin: "1234".to_string(),
            seed_opening_deposit: true,
            statement_length: 5,
            success_delay_ms: 1500,
            exit_delay_ms: 3000,
            clock_refresh_secs: 60,
            date_format: "%-m/%-d/%Y".to_string(),
            time_format: "%I:%M %p".to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check the invariants a session relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_pin_shaped(&self.pin) {
            return Err(ConfigError::InvalidPin);
        }
        if self.opening_balance < Decimal::ZERO {
            return Err(ConfigError::NegativeBalance(self.opening_balance));
        }
        if self.statement_length == 0 {
            return Err(ConfigError::ZeroStatementLength);
        }
        if self.success_delay_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "success_delay_ms",
            });
        }
        if self.exit_delay_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "exit_delay_ms",
            });
        }
        if self.clock_refresh_secs == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "clock_refresh_secs",
            });
        }
        if !is_valid_format(&self.date_format) {
            return Err(ConfigError::InvalidFormat {
                field: "date",
                format: self.date_format.clone(),
            });
        }
        if !is_valid_format(&self.time_format) {
            return Err(ConfigError::InvalidFormat {
                field: "time",
                format: self.time_format.clone(),
            });
        }
        Ok(())
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }

    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }

    pub fn clock_refresh(&self) -> Duration {
        Duration::from_secs(self.clock_refresh_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.opening_balance, dec!(5000.00));
        assert_eq!(config.success_delay(), Duration::from_millis(1500));
        assert_eq!(config.exit_delay(), Duration::from_secs(3));
        assert_eq!(config.clock_refresh(), Duration::from_secs(60));
    }

    #[test]
    fn empty_json_is_the_default() {
        let config = SessionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config =
            SessionConfig::from_json_str(r#"{ "opening_balance": "100.50", "statement_length": 3 }"#)
                .unwrap();

        assert_eq!(config.opening_balance, dec!(100.50));
        assert_eq!(config.statement_length, 3);
        assert_eq!(config.pin, "1234");
    }

    #[test]
    fn malformed_pin_is_rejected() {
        let result = SessionConfig::from_json_str(r#"{ "pin": "12a4" }"#);
        assert!(matches!(result, Err(ConfigError::InvalidPin)));
    }

    #[test]
    fn negative_balance_is_rejected() {
        let result = SessionConfig::from_json_str(r#"{ "opening_balance": "-1" }"#);
        assert!(matches!(result, Err(ConfigError::NegativeBalance(_))));
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(matches!(
            SessionConfig::from_json_str(r#"{ "statement_length": 0 }"#),
            Err(ConfigError::ZeroStatementLength)
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{ "exit_delay_ms": 0 }"#),
            Err(ConfigError::ZeroDuration { field: "exit_delay_ms" })
        ));
    }

    #[test]
    fn bad_format_is_rejected() {
        let result = SessionConfig::from_json_str(r#"{ "time_format": "%Q" }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidFormat { field: "time", .. })
        ));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let result = SessionConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SessionConfig::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
